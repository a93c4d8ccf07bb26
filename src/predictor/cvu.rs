//! Constant value unit (CVU).
//!
//! A small fully-associative table of `(pc, load address)` pairs which have
//! been verified to hold a constant value. Stores to a tracked address remove
//! the matching entries. Replacement is LRU, using a rank per entry where
//! `1` is the most recently used. The ranks of the valid entries are always
//! a permutation of `1..=num_valid`, and invalid entries have rank `0`.

use log::{ debug, trace };
use crate::Addr;
use crate::error::ConfigError;

/// An entry in the [CVU].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CVUEntry {
    /// Program counter of the load that placed this entry
    pub pc: Addr,
    /// Data address associated with this entry
    pub addr: Addr,
    /// Recency rank (`1` is most recently used, `0` when invalid)
    pub lru: usize,
    pub valid: bool,
}
impl CVUEntry {
    fn matches(&self, pc: Addr, addr: Addr) -> bool {
        self.valid && self.pc == pc && self.addr == addr
    }
}

/// Container for [CVU] runtime stats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CVUStats {
    /// Calls to [CVU::lookup]
    pub lookups: usize,
    /// Lookups which found a matching entry
    pub hits: usize,
    /// New entries placed in the table
    pub inserts: usize,
    /// Inserts which replaced a valid entry
    pub evictions: usize,
    /// Entries removed by a store
    pub invalidations: usize,
}

#[derive(Clone, Debug)]
pub struct CVU {
    data: Vec<CVUEntry>,
    num_valid: usize,
    pub stat: CVUStats,
}
impl CVU {
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::EmptyCVU);
        }
        debug!("Created a CVU with size = {}", size);
        Ok(Self {
            data: vec![CVUEntry::default(); size],
            num_valid: 0,
            stat: CVUStats::default(),
        })
    }

    pub fn size(&self) -> usize { self.data.len() }
    pub fn num_valid(&self) -> usize { self.num_valid }
    pub fn entries(&self) -> &[CVUEntry] { &self.data }

    /// Returns true if `(pc, addr)` is tracked, without touching LRU state.
    pub fn contains(&self, pc: Addr, addr: Addr) -> bool {
        self.data.iter().any(|e| e.matches(pc, addr))
    }

    /// Return the LRU rank of `(pc, addr)`, if it is tracked.
    pub fn rank_of(&self, pc: Addr, addr: Addr) -> Option<usize> {
        self.data.iter().find(|e| e.matches(pc, addr)).map(|e| e.lru)
    }

    fn find(&self, pc: Addr, addr: Addr) -> Option<usize> {
        self.data.iter().position(|e| e.matches(pc, addr))
    }

    /// Make the entry at `idx` the most recently used.
    fn promote(&mut self, idx: usize) {
        let old_lru = self.data[idx].lru;
        for entry in self.data.iter_mut() {
            if entry.valid && entry.lru < old_lru {
                entry.lru += 1;
            }
        }
        self.data[idx].lru = 1;
    }

    /// Returns true if `(pc, load_addr)` is tracked by the CVU, promoting
    /// the matching entry to most recently used.
    pub fn lookup(&mut self, pc: Addr, load_addr: Addr) -> bool {
        self.stat.lookups += 1;
        match self.find(pc, load_addr) {
            Some(idx) => {
                trace!("CVU hit for {:#x} (pc={:#x}) at index {}, rank {}",
                    load_addr, pc, idx, self.data[idx].lru);
                self.stat.hits += 1;
                self.promote(idx);
                true
            },
            None => {
                trace!("CVU miss for {:#x} (pc={:#x})", load_addr, pc);
                false
            },
        }
    }

    /// Start tracking `(pc, load_addr)`.
    ///
    /// A free slot is used when one exists, and the new entry takes the next
    /// unused rank. Otherwise the least-recently used entry is overwritten
    /// in place and the new entry inherits its rank. An entry which is
    /// already tracked is promoted instead.
    ///
    /// Panics if the rank bookkeeping is inconsistent.
    pub fn update(&mut self, pc: Addr, load_addr: Addr) {
        if let Some(idx) = self.find(pc, load_addr) {
            trace!("CVU refresh for {:#x} (pc={:#x}) at index {}",
                load_addr, pc, idx);
            self.promote(idx);
            return;
        }

        self.stat.inserts += 1;
        if self.num_valid < self.size() {
            let idx = self.data.iter().position(|e| !e.valid)
                .unwrap_or_else(|| panic!(
                    "CVU has {} of {} valid entries but no free slot",
                    self.num_valid, self.size()
                ));
            self.num_valid += 1;
            self.data[idx] = CVUEntry {
                pc,
                addr: load_addr,
                lru: self.num_valid,
                valid: true,
            };
            trace!("CVU placed {:#x} (pc={:#x}) at free index {}",
                load_addr, pc, idx);
        } else {
            let lru_rank = self.size();
            let idx = self.data.iter()
                .position(|e| e.valid && e.lru == lru_rank)
                .unwrap_or_else(|| panic!(
                    "CVU is full but no entry has rank {}", lru_rank
                ));
            trace!("CVU evicting {:#x} (pc={:#x}) at index {} for {:#x} (pc={:#x})",
                self.data[idx].addr, self.data[idx].pc, idx, load_addr, pc);
            self.stat.evictions += 1;
            self.data[idx] = CVUEntry {
                pc,
                addr: load_addr,
                lru: self.num_valid,
                valid: true,
            };
        }
    }

    /// Remove every entry tracking `store_addr`.
    ///
    /// Several entries may match when different loads read the same address.
    pub fn invalidate(&mut self, store_addr: Addr) {
        for idx in 0..self.data.len() {
            if !(self.data[idx].valid && self.data[idx].addr == store_addr) {
                continue;
            }
            trace!("CVU invalidating {:#x} (pc={:#x}) at index {}",
                store_addr, self.data[idx].pc, idx);
            let old_lru = self.data[idx].lru;
            self.data[idx].valid = false;
            self.data[idx].lru = 0;
            for entry in self.data.iter_mut() {
                if entry.valid && entry.lru > old_lru {
                    entry.lru -= 1;
                }
            }
            self.num_valid -= 1;
            self.stat.invalidations += 1;
        }
    }

    /// Invalidate all entries.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|e| *e = CVUEntry::default());
        self.num_valid = 0;
    }

    /// Returns the ranks of all valid entries, in ascending order.
    pub fn ranks(&self) -> Vec<usize> {
        let mut res: Vec<usize> = self.data.iter()
            .filter(|e| e.valid)
            .map(|e| e.lru)
            .collect();
        res.sort_unstable();
        res
    }
}
