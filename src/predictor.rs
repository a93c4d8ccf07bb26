//! Implementations of the structures used for load value prediction.

pub mod table;
pub mod counter;
pub mod lct;
pub mod lvpt;
pub mod cvu;
pub mod lvp;

pub use table::*;
pub use counter::*;
pub use lct::*;
pub use lvpt::*;
pub use cvu::*;
pub use lvp::*;

use crate::LoadValue;

/// The kind of prediction made by an [LVPredictor].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PredictOutcome {
    /// The cached value should not be used
    DontPredict = 0,
    /// The cached value should be used
    Predict = 1,
    /// The cached value should be used, and the load looks constant
    PredictConstant = 2,
}
impl PredictOutcome {
    pub fn as_u8(self) -> u8 { self as u8 }

    /// Returns true if a value should be forwarded to dependent instructions.
    pub fn is_prediction(self) -> bool {
        !matches!(self, Self::DontPredict)
    }
}

impl TryFrom<u8> for PredictOutcome {
    type Error = u8;
    fn try_from(x: u8) -> Result<Self, u8> {
        match x {
            0 => Ok(Self::DontPredict),
            1 => Ok(Self::Predict),
            2 => Ok(Self::PredictConstant),
            _ => Err(x),
        }
    }
}

/// Output from [LVPredictor::lookup].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValuePrediction {
    pub outcome: PredictOutcome,

    /// The cached value, when the LVPT has one (even if the outcome is
    /// [PredictOutcome::DontPredict])
    pub value: Option<LoadValue>,
}
impl ValuePrediction {
    pub fn none() -> Self {
        Self { outcome: PredictOutcome::DontPredict, value: None }
    }

    /// Returns the value to forward, if a prediction was made.
    pub fn predicted_value(&self) -> Option<LoadValue> {
        if self.outcome.is_prediction() { self.value } else { None }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn outcome_encoding() {
        for x in 0..=2u8 {
            let outcome = PredictOutcome::try_from(x).unwrap();
            assert_eq!(outcome.as_u8(), x);
        }
        assert_eq!(PredictOutcome::try_from(3), Err(3));
        assert!(!PredictOutcome::DontPredict.is_prediction());
    }

    #[test]
    fn predicted_value_requires_prediction() {
        let v = Some(LoadValue::from(1u64));
        let p = ValuePrediction { outcome: PredictOutcome::DontPredict, value: v };
        assert_eq!(p.predicted_value(), None);
        let p = ValuePrediction { outcome: PredictOutcome::Predict, value: v };
        assert_eq!(p.predicted_value(), v);
    }
}
