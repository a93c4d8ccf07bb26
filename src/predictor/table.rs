//! Types for implementing a direct-mapped table indexed by program counter.

use crate::Addr;
use crate::error::ConfigError;

/// Interface to a direct-mapped table of predictor state.
pub trait PredictorTable {
    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Number of low program counter bits dropped before indexing.
    fn shift_amt(&self) -> u32;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;

    /// Returns a bitmask corresponding to the number of entries in the table.
    fn index_mask(&self) -> usize {
        debug_assert!(self.size().is_power_of_two());
        self.size() - 1
    }

    /// Given a program counter value, return the corresponding index.
    fn get_index(&self, pc: Addr) -> usize {
        pc.checked_shr(self.shift_amt()).unwrap_or(0) & self.index_mask()
    }
}

/// Check that `size` can be used to build a table.
pub fn check_table_size(table: &'static str, size: usize)
    -> Result<(), ConfigError>
{
    if !size.is_power_of_two() {
        return Err(ConfigError::NotPowerOfTwo { table, size });
    }
    Ok(())
}
