//! Configuration for building a load value predictor.
//!
//! A configuration can be written in TOML. Missing keys take their default
//! values:
//!
//! ```toml
//! cvu_size = 16
//! lvpt_size = 1024
//! lct_size = 256
//! lct_bits = 2
//! inst_shift_amt = 2
//! ```

use std::path::Path;

use serde::{ Deserialize, Serialize };

use crate::error::ConfigError;
use crate::predictor::*;

mod defaults {
    pub const CVU_SIZE: usize = 16;
    pub const LVPT_SIZE: usize = 1024;
    pub const LCT_SIZE: usize = 256;
    pub const LCT_BITS: u8 = 2;
    pub const INST_SHIFT_AMT: u32 = 2;
}

/// Configuration for an [`LVPredictor`] and its [`CVU`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LVPConfig {
    /// Number of entries in the CVU
    pub cvu_size: usize,

    /// Number of entries in the LVPT (power of two)
    pub lvpt_size: usize,

    /// Number of entries in the LCT (power of two)
    pub lct_size: usize,

    /// Width of each LCT counter in bits
    pub lct_bits: u8,

    /// Number of low program counter bits dropped before indexing
    pub inst_shift_amt: u32,
}

impl Default for LVPConfig {
    fn default() -> Self {
        Self {
            cvu_size: defaults::CVU_SIZE,
            lvpt_size: defaults::LVPT_SIZE,
            lct_size: defaults::LCT_SIZE,
            lct_bits: defaults::LCT_BITS,
            inst_shift_amt: defaults::INST_SHIFT_AMT,
        }
    }
}

impl LVPConfig {
    /// Check that a predictor can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_table_size("LVPT", self.lvpt_size)?;
        check_table_size("LCT", self.lct_size)?;
        SaturatingCounterConfig::new(self.lct_bits)?;
        if self.cvu_size == 0 {
            return Err(ConfigError::EmptyCVU);
        }
        Ok(())
    }

    /// Parse and validate a configuration from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and validate a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Get the [approximate] number of storage bits.
    ///
    /// CVU entries are counted as two 64-bit addresses plus a rank and
    /// a valid bit.
    pub fn storage_bits(&self) -> usize {
        let rank_bits = (usize::BITS - self.cvu_size.leading_zeros()) as usize;
        let cvu_entry = 64 + 64 + rank_bits + 1;
        let lvpt = self.lvpt_size * crate::value::MAX_VALUE_BYTES * 8;
        let lct = self.lct_size * self.lct_bits as usize;
        lvpt + lct + cvu_entry * self.cvu_size
    }

    /// Use this configuration to create a new [`LVPredictor`].
    ///
    /// Each table checks its own parameters as it is built.
    pub fn build(self) -> Result<LVPredictor, ConfigError> {
        LVPredictor::new(self)
    }
}
