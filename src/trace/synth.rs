//! Synthetic workloads.
//!
//! These model small loops over an array of integers, the kind of program
//! where a load repeatedly observes the same value.

use std::collections::HashMap;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::{ Addr, LoadValue };
use crate::trace::*;

/// Base address of the code for a synthetic workload.
pub const CODE_BASE: Addr = 0x0001_0000;

/// Base address of the array used by a synthetic workload.
pub const DATA_BASE: Addr = 0x8000_0000;

/// Width of each array element in bytes.
pub const ELEMENT_BYTES: usize = 4;

/// Builds a trace against a simple flat memory.
#[derive(Debug, Default)]
pub struct TraceBuilder {
    data: Vec<MemRecord>,
    mem: HashMap<Addr, LoadValue>,
}
impl TraceBuilder {
    pub fn new() -> Self { Self::default() }

    /// Set the contents of memory without emitting a record.
    pub fn init(&mut self, addr: Addr, value: LoadValue) {
        self.mem.insert(addr, value);
    }

    /// Emit a load. Uninitialized memory reads as zero.
    pub fn load(&mut self, pc: Addr, addr: Addr) -> LoadValue {
        let value = self.mem.get(&addr).copied()
            .unwrap_or_else(|| LoadValue::from(0u32));
        self.data.push(MemRecord::load(pc, addr, value));
        value
    }

    /// Emit a store.
    pub fn store(&mut self, pc: Addr, addr: Addr, value: LoadValue) {
        self.mem.insert(addr, value);
        self.data.push(MemRecord::store(pc, addr, value));
    }

    pub fn build(self, name: impl ToString) -> BinaryTrace {
        BinaryTrace::new(name, self.data)
    }
}

/// A parameterized synthetic workload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Workload {
    /// An array holding `array[i] = i`, summed `iters` times by a fully
    /// unrolled loop (one load instruction per element).
    ConstantArraySum { size: usize, iters: usize },

    /// An array of random values in `0..100`, summed `iters` times by a
    /// rolled loop (one load instruction for every element).
    RandomArraySum { size: usize, iters: usize, seed: u64 },

    /// Like [Workload::ConstantArraySum], but every `period` iterations one
    /// element is overwritten with a new value.
    StoreInterleaved { size: usize, iters: usize, period: usize },
}
impl Workload {
    /// The workloads used when no trace is given.
    pub fn defaults() -> [Self; 3] {
        [
            Self::ConstantArraySum { size: 8, iters: 32 },
            Self::RandomArraySum { size: 16, iters: 8, seed: 27 },
            Self::StoreInterleaved { size: 8, iters: 32, period: 4 },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::ConstantArraySum { .. } => "constant_array_sum",
            Self::RandomArraySum { .. } => "random_array_sum",
            Self::StoreInterleaved { .. } => "store_interleaved",
        }
    }

    /// Find a default workload by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::defaults().into_iter().find(|w| w.name() == name)
    }

    fn element(i: usize) -> Addr { DATA_BASE + i * ELEMENT_BYTES }

    /// Generate the trace for this workload.
    pub fn generate(&self) -> BinaryTrace {
        let mut b = TraceBuilder::new();
        match *self {
            Self::ConstantArraySum { size, iters } => {
                for i in 0..size {
                    b.init(Self::element(i), LoadValue::from(i as u32));
                }
                for _ in 0..iters {
                    for i in 0..size {
                        b.load(CODE_BASE + i * 4, Self::element(i));
                    }
                }
            },
            Self::RandomArraySum { size, iters, seed } => {
                let mut rng = StdRng::seed_from_u64(seed);
                for i in 0..size {
                    let v: u32 = rng.gen_range(0..100);
                    b.init(Self::element(i), LoadValue::from(v));
                }
                for _ in 0..iters {
                    for i in 0..size {
                        b.load(CODE_BASE, Self::element(i));
                    }
                }
            },
            Self::StoreInterleaved { size, iters, period } => {
                for i in 0..size {
                    b.init(Self::element(i), LoadValue::from(i as u32));
                }
                let store_pc = CODE_BASE + size * 4;
                for it in 0..iters {
                    for i in 0..size {
                        b.load(CODE_BASE + i * 4, Self::element(i));
                    }
                    if period != 0 && size != 0 && (it + 1) % period == 0 {
                        let victim = (it / period) % size;
                        let value = LoadValue::from((it + size) as u32);
                        b.store(store_pc, Self::element(victim), value);
                    }
                }
            },
        }
        b.build(self.name())
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constant_array_sum() {
        let t = Workload::ConstantArraySum { size: 8, iters: 32 }.generate();
        assert_eq!(t.num_entries(), 8 * 32);
        assert!(t.as_slice().iter().all(|r| r.is_load()));
        let r = t.as_slice()[8 + 3];
        assert_eq!(r.pc, CODE_BASE + 12);
        assert_eq!(r.value, LoadValue::from(3u32));
    }

    #[test]
    fn random_array_sum_is_deterministic() {
        let w = Workload::RandomArraySum { size: 16, iters: 8, seed: 27 };
        let a = w.generate();
        let b = w.generate();
        assert_eq!(a.data, b.data);
        assert!(a.as_slice().iter().all(|r| r.pc == CODE_BASE));
        assert!(a.as_slice().iter().all(|r| r.value.as_u64() < 100));
    }

    #[test]
    fn stores_change_later_loads() {
        let w = Workload::StoreInterleaved { size: 4, iters: 4, period: 2 };
        let t = w.generate();
        let stores: Vec<&MemRecord> = t.as_slice().iter()
            .filter(|r| r.is_store())
            .collect();
        assert_eq!(stores.len(), 2);
        let st = *stores[0];
        let next_load = t.as_slice().iter()
            .skip_while(|r| **r != st)
            .find(|r| r.is_load() && r.addr == st.addr)
            .unwrap();
        assert_eq!(next_load.value, st.value);
    }

    #[test]
    fn empty_arrays_give_empty_traces() {
        let workloads = [
            Workload::ConstantArraySum { size: 0, iters: 4 },
            Workload::RandomArraySum { size: 0, iters: 4, seed: 27 },
            Workload::StoreInterleaved { size: 0, iters: 4, period: 1 },
        ];
        for w in workloads {
            assert_eq!(w.generate().num_entries(), 0, "{}", w.name());
        }
    }

    #[test]
    fn lookup_by_name() {
        for w in Workload::defaults() {
            assert_eq!(Workload::from_name(w.name()), Some(w));
        }
        assert_eq!(Workload::from_name("nope"), None);
    }
}
