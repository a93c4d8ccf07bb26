//! Load classification table (LCT).

use crate::Addr;
use crate::error::ConfigError;
use crate::predictor::*;

/// A direct-mapped table of [SaturatingCounter] indexed by program counter.
///
/// The most-significant bit of a counter decides whether a prediction is
/// made, and a saturated counter marks the load as a constant.
#[derive(Clone, Debug)]
pub struct LCT {
    /// Saturating counter configuration
    cfg: SaturatingCounterConfig,

    /// Table of counters
    data: Vec<SaturatingCounter>,

    /// Number of entries
    size: usize,

    /// Shift applied to the program counter before indexing
    shift_amt: u32,
}
impl LCT {
    pub fn new(size: usize, bits: u8, shift_amt: u32)
        -> Result<Self, ConfigError>
    {
        check_table_size("LCT", size)?;
        let cfg = SaturatingCounterConfig::new(bits)?;
        Ok(Self {
            data: vec![cfg.build(); size],
            cfg,
            size,
            shift_amt,
        })
    }

    pub fn counter_bits(&self) -> u8 { self.cfg.bits }

    pub fn storage_bits(&self) -> usize {
        self.cfg.storage_bits() * self.size
    }

    /// Return the counter associated with `pc`.
    pub fn counter(&self, pc: Addr) -> &SaturatingCounter {
        self.get_entry(self.get_index(pc))
    }

    /// Strengthen confidence for the load at `pc`.
    pub fn increment(&mut self, pc: Addr) {
        let idx = self.get_index(pc);
        self.get_entry_mut(idx).increment();
    }

    /// Weaken confidence for the load at `pc`.
    pub fn decrement(&mut self, pc: Addr) {
        let idx = self.get_index(pc);
        self.get_entry_mut(idx).decrement();
    }

    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|c| c.reset());
    }
}

impl PredictorTable for LCT {
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.size }
    fn shift_amt(&self) -> u32 { self.shift_amt }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        &self.data[idx & self.index_mask()]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_bad_sizes() {
        assert!(matches!(
            LCT::new(100, 2, 2),
            Err(ConfigError::NotPowerOfTwo { table: "LCT", size: 100 })
        ));
        assert!(LCT::new(0, 2, 2).is_err());
        assert!(matches!(LCT::new(64, 0, 2), Err(ConfigError::ZeroWidthCounter)));
    }

    #[test]
    fn index_drops_low_bits() {
        let lct = LCT::new(16, 2, 2).unwrap();
        assert_eq!(lct.get_index(0x0), 0);
        assert_eq!(lct.get_index(0x3), 0);
        assert_eq!(lct.get_index(0x4), 1);
        assert_eq!(lct.get_index(0x3c), 15);
        // Wraps around after 16 instructions
        assert_eq!(lct.get_index(0x40), 0);
    }

    #[test]
    fn aliasing_pcs_share_a_counter() {
        let mut lct = LCT::new(4, 2, 2).unwrap();
        lct.increment(0x00);
        lct.increment(0x10);
        assert_eq!(lct.counter(0x00).value(), 2);
        assert_eq!(lct.counter(0x04).value(), 0);
    }
}
