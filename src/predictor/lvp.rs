//! The load value predictor.

use std::cell::{ Ref, RefCell, RefMut };
use std::rc::Rc;

use log::{ debug, trace };

use crate::{ Addr, LoadValue, LVPConfig };
use crate::error::ConfigError;
use crate::predictor::*;

/// A [CVU] which may be consulted by more than one predictor.
pub type SharedCVU = Rc<RefCell<CVU>>;

/// Container for [LVPredictor] runtime stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LVPStats {
    /// Calls to [LVPredictor::lookup]
    pub lookups: usize,
    /// Lookups which found a value in the LVPT
    pub lvpt_hits: usize,
    /// Lookups which returned [PredictOutcome::Predict]
    pub predictions: usize,
    /// Lookups which returned [PredictOutcome::PredictConstant]
    pub constant_predictions: usize,
    /// Updates for a correct prediction
    pub correct_updates: usize,
    /// Updates for an incorrect prediction
    pub incorrect_updates: usize,
    /// Updates ignored because no value was provided
    pub ignored_updates: usize,
}

/// A last-value load predictor.
///
/// The [LCT] decides whether the value cached in the [LVPT] should be used,
/// and whether the load looks constant. Constant predictions can be checked
/// against the attached [CVU] by the caller.
pub struct LVPredictor {
    /// The configuration used to create this object
    pub cfg: LVPConfig,

    pub stat: LVPStats,

    /// Constancy tracker attached to this predictor
    cvu: SharedCVU,

    /// Confidence counters
    lct: LCT,

    /// Cached values
    lvpt: LVPT,
}
impl LVPredictor {
    /// Build a predictor with its own [CVU].
    pub fn new(cfg: LVPConfig) -> Result<Self, ConfigError> {
        let cvu = Rc::new(RefCell::new(CVU::new(cfg.cvu_size)?));
        Self::with_cvu(cfg, cvu)
    }

    /// Build a predictor attached to an existing [CVU].
    ///
    /// `cfg.cvu_size` is ignored here.
    pub fn with_cvu(cfg: LVPConfig, cvu: SharedCVU)
        -> Result<Self, ConfigError>
    {
        let lvpt = LVPT::new(cfg.lvpt_size, cfg.inst_shift_amt)?;
        let lct = LCT::new(cfg.lct_size, cfg.lct_bits, cfg.inst_shift_amt)?;
        debug!("Created LVP with LVPT size = {}, LCT size = {}, LCT bits = {}",
            cfg.lvpt_size, cfg.lct_size, cfg.lct_bits);
        Ok(Self {
            cfg,
            stat: LVPStats::default(),
            cvu,
            lct,
            lvpt,
        })
    }

    pub fn cvu(&self) -> Ref<'_, CVU> { self.cvu.borrow() }
    pub fn cvu_mut(&self) -> RefMut<'_, CVU> { self.cvu.borrow_mut() }
    pub fn shared_cvu(&self) -> SharedCVU { Rc::clone(&self.cvu) }

    pub fn lct(&self) -> &LCT { &self.lct }
    pub fn lvpt(&self) -> &LVPT { &self.lvpt }

    /// Index into the [LCT] for `pc`.
    pub fn lct_index(&self, pc: Addr) -> usize { self.lct.get_index(pc) }

    /// Index into the [LVPT] for `pc`.
    pub fn lvpt_index(&self, pc: Addr) -> usize { self.lvpt.get_index(pc) }

    /// Compute a prediction for the load at `pc` without recording stats.
    pub fn predict(&self, pc: Addr) -> ValuePrediction {
        let ctr = self.lct.counter(pc);
        let confident = ctr.msb();
        let constant = ctr.is_saturated();

        let value = match self.lvpt.value(pc) {
            Some(v) => v,
            // Never predict without a cached value
            None => return ValuePrediction::none(),
        };

        let outcome = match (confident, constant) {
            (true, true) => PredictOutcome::PredictConstant,
            (true, false) => PredictOutcome::Predict,
            _ => PredictOutcome::DontPredict,
        };
        ValuePrediction { outcome, value: Some(value) }
    }

    /// Look up the predicted value for the load at `pc`.
    ///
    /// Only the stats are changed. Promoting the load in the [CVU] is left
    /// to the caller.
    pub fn lookup(&mut self, pc: Addr) -> ValuePrediction {
        let res = self.predict(pc);
        trace!("LVP lookup pc={:#x} LCT[{}]={} LVPT[{}]={:?} -> {:?}",
            pc,
            self.lct.get_index(pc), self.lct.counter(pc).value(),
            self.lvpt.get_index(pc), res.value,
            res.outcome,
        );

        self.stat.lookups += 1;
        if res.value.is_some() {
            self.stat.lvpt_hits += 1;
        }
        match res.outcome {
            PredictOutcome::Predict => self.stat.predictions += 1,
            PredictOutcome::PredictConstant => {
                self.stat.constant_predictions += 1
            },
            PredictOutcome::DontPredict => {},
        }
        res
    }

    /// Train the predictor with the value actually returned by the load at
    /// `pc`. Nothing happens when `value` is [None].
    ///
    /// The LVPT is always refreshed with `value`. The LCT counter is
    /// incremented when the prediction was correct and decremented otherwise.
    pub fn update(&mut self, pc: Addr, correct: bool, value: Option<LoadValue>) {
        let value = match value {
            Some(v) => v,
            None => {
                self.stat.ignored_updates += 1;
                return;
            },
        };

        self.lvpt.insert(pc, value);
        if correct {
            self.lct.increment(pc);
            self.stat.correct_updates += 1;
        } else {
            self.lct.decrement(pc);
            self.stat.incorrect_updates += 1;
        }
        trace!("LVP update pc={:#x} correct={} LCT[{}]={} LVPT[{}]={:?}",
            pc, correct,
            self.lct.get_index(pc), self.lct.counter(pc).value(),
            self.lvpt.get_index(pc), value,
        );
    }

    /// Clear all predictor state and stats. The [CVU] is left untouched.
    pub fn reset(&mut self) {
        self.lct.reset();
        self.lvpt.reset();
        self.stat = LVPStats::default();
    }

    pub fn reset_stats(&mut self) {
        self.stat = LVPStats::default();
    }

    /// Get the [approximate] number of storage bits, excluding the [CVU].
    pub fn storage_bits(&self) -> usize {
        self.lct.storage_bits() + self.lvpt.storage_bits()
    }
}
