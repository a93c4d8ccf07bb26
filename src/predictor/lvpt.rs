//! Load value prediction table (LVPT).

use crate::{Addr, LoadValue};
use crate::error::ConfigError;
use crate::predictor::*;

/// A direct-mapped table holding the most recent value observed for each
/// slot, indexed by program counter.
#[derive(Clone, Debug)]
pub struct LVPT {
    size: usize,
    shift_amt: u32,
    data: Vec<Option<LoadValue>>,
}
impl LVPT {
    pub fn new(size: usize, shift_amt: u32) -> Result<Self, ConfigError> {
        check_table_size("LVPT", size)?;
        Ok(Self {
            size,
            shift_amt,
            data: vec![None; size],
        })
    }

    /// Return the cached value for `pc`, if any.
    pub fn value(&self, pc: Addr) -> Option<LoadValue> {
        *self.get_entry(self.get_index(pc))
    }

    /// Replace the cached value for `pc`.
    pub fn insert(&mut self, pc: Addr, value: LoadValue) {
        let idx = self.get_index(pc);
        *self.get_entry_mut(idx) = Some(value);
    }

    /// Number of slots holding a value.
    pub fn occupancy(&self) -> usize {
        self.data.iter().filter(|e| e.is_some()).count()
    }

    pub fn storage_bits(&self) -> usize {
        self.size * crate::value::MAX_VALUE_BYTES * 8
    }

    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|e| *e = None);
    }
}

impl PredictorTable for LVPT {
    type Entry = Option<LoadValue>;

    fn size(&self) -> usize { self.size }
    fn shift_amt(&self) -> u32 { self.shift_amt }

    fn get_entry(&self, idx: usize) -> &Option<LoadValue> {
        &self.data[idx & self.index_mask()]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut Option<LoadValue> {
        let index = idx & self.index_mask();
        &mut self.data[index]
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn starts_empty() {
        let lvpt = LVPT::new(8, 2).unwrap();
        assert_eq!(lvpt.occupancy(), 0);
        assert_eq!(lvpt.value(0x1000), None);
    }

    #[test]
    fn insert_overwrites() {
        let mut lvpt = LVPT::new(8, 2).unwrap();
        lvpt.insert(0x1000, LoadValue::from(1u64));
        lvpt.insert(0x1000, LoadValue::from(2u64));
        assert_eq!(lvpt.value(0x1000), Some(LoadValue::from(2u64)));
        assert_eq!(lvpt.occupancy(), 1);
    }

    #[test]
    fn rejects_bad_size() {
        assert!(matches!(
            LVPT::new(3, 2),
            Err(ConfigError::NotPowerOfTwo { table: "LVPT", size: 3 })
        ));
    }
}
