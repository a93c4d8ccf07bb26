//! Replaying a memory trace through a predictor.

use log::trace;

use crate::predictor::*;
use crate::stats::*;
use crate::trace::*;

/// The result of replaying a single load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadResult {
    pub outcome: PredictOutcome,
    /// The LVPT held the value actually returned by the load
    pub correct: bool,
    /// A constant prediction was confirmed by the CVU
    pub verified: bool,
}
impl LoadResult {
    /// Returns true if a value was forwarded and it was the right one.
    pub fn hit(&self) -> bool { self.outcome.is_prediction() && self.correct }
}

/// Drives an [LVPredictor] (and its [CVU]) with a stream of [MemRecord].
///
/// For each load, the predictor is looked up and the cached value compared
/// against the value in the record. Constant predictions are checked
/// against the CVU, and a correct constant prediction which is not yet
/// tracked is inserted. Each store invalidates the CVU entries for its
/// address.
pub struct LoadValueSim {
    pub lvp: LVPredictor,
    pub stat: LoadStats,
}
impl LoadValueSim {
    pub fn new(lvp: LVPredictor) -> Self {
        Self { lvp, stat: LoadStats::new() }
    }

    /// Replay a single record. Returns [None] for stores.
    pub fn step(&mut self, record: &MemRecord) -> Option<LoadResult> {
        match record.kind {
            MemKind::Store => {
                self.stat.global_stores += 1;
                self.lvp.cvu_mut().invalidate(record.addr);
                None
            },
            MemKind::Load => Some(self.step_load(record)),
        }
    }

    fn step_load(&mut self, record: &MemRecord) -> LoadResult {
        let pred = self.lvp.lookup(record.pc);
        let correct = pred.value == Some(record.value);

        let constant = pred.outcome == PredictOutcome::PredictConstant;
        let verified = constant
            && self.lvp.cvu_mut().lookup(record.pc, record.addr);

        self.lvp.update(record.pc, correct, Some(record.value));
        if constant && correct && !verified {
            self.lvp.cvu_mut().update(record.pc, record.addr);
        }

        let res = LoadResult { outcome: pred.outcome, correct, verified };
        trace!("pc={:#x} addr={:#x} {:?}", record.pc, record.addr, res);
        self.stat.record(record.pc, pred.outcome, correct);
        if verified {
            self.stat.global_verified += 1;
        }
        res
    }

    /// Replay a slice of records.
    pub fn run(&mut self, records: &[MemRecord]) {
        for record in records {
            self.step(record);
        }
    }

    /// Take a snapshot of the global results.
    pub fn report(&self) -> SimReport {
        SimReport {
            loads: self.stat.global_loads,
            stores: self.stat.global_stores,
            preds: self.stat.global_preds,
            hits: self.stat.global_hits,
            verified: self.stat.global_verified,
            lvp: self.lvp.stat,
            cvu: self.lvp.cvu().stat,
        }
    }
}

/// Summary of a replayed trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimReport {
    pub loads: usize,
    pub stores: usize,
    pub preds: usize,
    pub hits: usize,
    pub verified: usize,
    pub lvp: LVPStats,
    pub cvu: CVUStats,
}
impl SimReport {
    pub fn accuracy(&self) -> f64 {
        if self.preds == 0 { 0.0 } else { self.hits as f64 / self.preds as f64 }
    }
    pub fn coverage(&self) -> f64 {
        if self.loads == 0 { 0.0 } else { self.preds as f64 / self.loads as f64 }
    }
}
impl std::fmt::Display for SimReport {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "  Loads: {} ({} stores)", self.loads, self.stores)?;
        writeln!(f, "  Predicted: {}/{} ({:.2}% coverage)",
            self.preds, self.loads, self.coverage() * 100.0)?;
        writeln!(f, "  Correct: {}/{} ({:.2}% accuracy)",
            self.hits, self.preds, self.accuracy() * 100.0)?;
        writeln!(f, "  Constant: {} predicted, {} verified by the CVU",
            self.lvp.constant_predictions, self.verified)?;
        write!(f, "  CVU: {} inserts, {} evictions, {} invalidations",
            self.cvu.inserts, self.cvu.evictions, self.cvu.invalidations)
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::{ LoadValue, LVPConfig };

    fn sim() -> LoadValueSim {
        let cfg = LVPConfig {
            cvu_size: 4,
            lvpt_size: 64,
            lct_size: 64,
            lct_bits: 2,
            inst_shift_amt: 2,
        };
        LoadValueSim::new(cfg.build().unwrap())
    }

    #[test]
    fn constant_load_becomes_verified() {
        let mut s = sim();
        let r = MemRecord::load(0x100, 0x8000, LoadValue::from(9u32));
        let results: Vec<LoadResult> = (0..7)
            .map(|_| s.step(&r).unwrap())
            .collect();

        // Cold, then the counter climbs 0 -> 1 -> 2 -> 3
        assert_eq!(results[0].outcome, PredictOutcome::DontPredict);
        assert!(!results[0].correct);
        assert!(results[1].correct);
        assert_eq!(results[2].outcome, PredictOutcome::DontPredict);
        assert_eq!(results[3].outcome, PredictOutcome::Predict);
        assert_eq!(results[4].outcome, PredictOutcome::PredictConstant);
        assert!(!results[4].verified);
        assert!(s.lvp.cvu().contains(0x100, 0x8000));
        assert!(results[5].verified);
        assert!(results[6].hit());
        assert_eq!(s.report().verified, 2);
    }

    #[test]
    fn store_invalidates_tracked_load() {
        let mut s = sim();
        let ld = MemRecord::load(0x100, 0x8000, LoadValue::from(9u32));
        for _ in 0..5 { s.step(&ld); }
        assert!(s.lvp.cvu().contains(0x100, 0x8000));

        let st = MemRecord::store(0x200, 0x8000, LoadValue::from(1u32));
        assert_eq!(s.step(&st), None);
        assert!(!s.lvp.cvu().contains(0x100, 0x8000));

        let ld = MemRecord::load(0x100, 0x8000, LoadValue::from(1u32));
        let res = s.step(&ld).unwrap();
        assert_eq!(res.outcome, PredictOutcome::PredictConstant);
        assert!(!res.correct);
        assert!(!res.verified);
        assert_eq!(s.lvp.lct().counter(0x100).value(), 2);
    }

    #[test]
    fn run_constant_workload() {
        use crate::trace::synth::Workload;
        let mut s = sim();
        let t = Workload::ConstantArraySum { size: 4, iters: 16 }.generate();
        s.run(t.as_slice());
        let report = s.report();
        assert_eq!(report.loads, 64);
        assert_eq!(report.hits, report.preds);
        // Each load is predicted from its fourth execution onwards.
        assert_eq!(report.preds, 4 * 13);
        assert_eq!(s.stat.num_unique_loads(), 4);
    }
}
