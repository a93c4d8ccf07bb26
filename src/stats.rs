//! Helpers for collecting statistics.

use std::collections::*;

use bitvec::prelude::*;
use itertools::*;

use crate::Addr;
use crate::predictor::PredictOutcome;

/// Container for recording simple statistics while evaluating a predictor.
#[derive(Debug, Default)]
pub struct LoadStats {
    /// Per-load statistics (indexed by program counter value).
    pub data: BTreeMap<Addr, LoadData>,

    /// Number of loads executed
    pub global_loads: usize,

    /// Number of loads for which a value was predicted
    pub global_preds: usize,

    /// Number of predicted values which were correct
    pub global_hits: usize,

    /// Number of constant predictions confirmed by the CVU
    pub global_verified: usize,

    /// Number of stores executed
    pub global_stores: usize,
}
impl LoadStats {
    pub fn new() -> Self { Self::default() }

    /// Fraction of predicted values which were correct.
    pub fn accuracy(&self) -> f64 {
        if self.global_preds == 0 { return 0.0; }
        self.global_hits as f64 / self.global_preds as f64
    }

    /// Fraction of loads for which a value was predicted.
    pub fn coverage(&self) -> f64 {
        if self.global_loads == 0 { return 0.0; }
        self.global_preds as f64 / self.global_loads as f64
    }

    /// Return the number of incorrect predictions.
    pub fn global_miss(&self) -> usize { self.global_preds - self.global_hits }

    /// Record the result of a single load.
    ///
    /// `hit` is only meaningful when `outcome` is a prediction.
    pub fn record(&mut self, pc: Addr, outcome: PredictOutcome, hit: bool) {
        self.global_loads += 1;
        let predicted = outcome.is_prediction();
        if predicted {
            self.global_preds += 1;
            if hit { self.global_hits += 1; }
        }

        let data = self.get_mut(pc);
        data.occ += 1;
        if predicted {
            data.preds += 1;
            data.pat.push(hit);
            if hit { data.hits += 1; }
        }
        if outcome == PredictOutcome::PredictConstant {
            data.constant += 1;
        }
    }

    /// Returns a reference to data collected for a particular load.
    pub fn get(&self, pc: Addr) -> Option<&LoadData> {
        self.data.get(&pc)
    }

    /// Returns a mutable reference to data collected for a particular load.
    /// Creates a new entry if one doesn't already exist.
    pub fn get_mut(&mut self, pc: Addr) -> &mut LoadData {
        self.data.entry(pc).or_default()
    }

    /// Returns the number of unique observed load instructions.
    pub fn num_unique_loads(&self) -> usize {
        self.data.len()
    }

    /// Returns the `n` most frequently executed loads.
    pub fn get_common_loads(&self, n: usize) -> Vec<(Addr, &LoadData)> {
        self.data.iter()
            .sorted_by(|x, y| x.1.occ.cmp(&y.1.occ))
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }

    /// Returns up to `n` frequently-predicted loads with poor accuracy.
    pub fn get_low_rate_loads(&self, n: usize) -> Vec<(Addr, &LoadData)> {
        self.data.iter()
            .filter(|(_, s)| s.preds > 0 && s.hit_rate() <= 0.55)
            .sorted_by(|x, y| x.1.preds.cmp(&y.1.preds))
            .rev()
            .take(n)
            .map(|(pc, s)| (*pc, s))
            .collect()
    }
}

/// Container for per-load statistics.
#[derive(Debug, Default)]
pub struct LoadData {
    /// Number of times this load was executed.
    pub occ: usize,

    /// Number of predictions made for this load.
    pub preds: usize,

    /// Number of correct predictions for this load.
    pub hits: usize,

    /// Number of constant predictions for this load.
    pub constant: usize,

    /// Record of prediction results (`true` when correct).
    pub pat: BitVec,
}
impl LoadData {
    /// Return the hit rate of predictions for this load.
    pub fn hit_rate(&self) -> f64 {
        if self.preds == 0 { return 0.0; }
        self.hits as f64 / self.preds as f64
    }

    /// Length of the longest run of correct predictions.
    pub fn longest_hit_run(&self) -> usize {
        let mut best = 0;
        let mut cur = 0;
        for hit in self.pat.iter().by_vals() {
            if hit {
                cur += 1;
                best = best.max(cur);
            } else {
                cur = 0;
            }
        }
        best
    }
}
