//! A load value predictor: a load classification table (LCT) of saturating
//! counters, a load value prediction table (LVPT) holding the last value
//! observed by each load, and a constant value unit (CVU) tracking loads
//! whose value is known to be unchanged.

pub mod error;
pub mod value;
pub mod config;
pub mod predictor;
pub mod trace;
pub mod stats;
pub mod sim;

pub use error::*;
pub use value::*;
pub use config::*;
pub use predictor::*;
pub use trace::*;

/// An instruction or data address.
pub type Addr = usize;
