//! Implementation of a saturating counter.

use crate::error::ConfigError;

/// Configuration for building a [`SaturatingCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounterConfig {
    /// Width of the counter in bits
    pub bits: u8,
    /// Initial value of the counter
    pub default_value: u8,
}
impl SaturatingCounterConfig {
    pub fn new(bits: u8) -> Result<Self, ConfigError> {
        if bits == 0 {
            return Err(ConfigError::ZeroWidthCounter);
        }
        if bits > 8 {
            return Err(ConfigError::CounterTooWide { bits });
        }
        Ok(Self { bits, default_value: 0 })
    }

    pub fn storage_bits(&self) -> usize { self.bits as usize }

    /// The largest value representable by the counter.
    pub fn max_value(&self) -> u8 {
        (((1u16) << self.bits) - 1) as u8
    }

    pub fn build(self) -> SaturatingCounter {
        SaturatingCounter {
            ctr: self.default_value.min(self.max_value()),
            max: self.max_value(),
            bits: self.bits,
        }
    }
}

/// An N-bit unsigned counter which clamps at `0` and `2^N - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    ctr: u8,
    max: u8,
    bits: u8,
}
impl SaturatingCounter {
    pub fn increment(&mut self) {
        if self.ctr < self.max {
            self.ctr += 1;
        }
    }

    pub fn decrement(&mut self) {
        self.ctr = self.ctr.saturating_sub(1);
    }

    pub fn value(&self) -> u8 { self.ctr }
    pub fn bits(&self) -> u8 { self.bits }
    pub fn max_value(&self) -> u8 { self.max }

    /// Returns true when the most-significant bit of the counter is set.
    pub fn msb(&self) -> bool {
        (self.ctr >> (self.bits - 1)) != 0
    }

    /// Returns true when the counter is at its maximum value.
    pub fn is_saturated(&self) -> bool {
        self.ctr == self.max
    }

    /// Set the value of the counter (clamped to the representable range).
    pub fn set(&mut self, val: u8) {
        self.ctr = val.min(self.max);
    }

    pub fn reset(&mut self) { self.ctr = 0; }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn saturates_both_ways() {
        let mut c = SaturatingCounterConfig::new(2).unwrap().build();
        for _ in 0..10 { c.increment(); }
        assert_eq!(c.value(), 3);
        assert!(c.is_saturated());
        for _ in 0..10 { c.decrement(); }
        assert_eq!(c.value(), 0);
        c.decrement();
        assert_eq!(c.value(), 0);
    }

    #[test]
    fn msb_tracks_upper_half() {
        let mut c = SaturatingCounterConfig::new(3).unwrap().build();
        let expected = [false, false, false, true, true, true, true];
        for msb in expected {
            c.increment();
            assert_eq!(c.msb(), msb, "value {}", c.value());
        }
        assert_eq!(c.value(), 7);
    }

    #[test]
    fn full_width() {
        let mut c = SaturatingCounterConfig::new(8).unwrap().build();
        c.set(254);
        c.increment();
        c.increment();
        assert_eq!(c.value(), 255);
        assert!(c.msb());
    }

    #[test]
    fn single_bit() {
        let mut c = SaturatingCounterConfig::new(1).unwrap().build();
        assert!(!c.msb());
        c.increment();
        assert!(c.msb());
        assert!(c.is_saturated());
    }

    #[test]
    fn bad_widths() {
        assert!(matches!(
            SaturatingCounterConfig::new(0),
            Err(ConfigError::ZeroWidthCounter)
        ));
        assert!(matches!(
            SaturatingCounterConfig::new(9),
            Err(ConfigError::CounterTooWide { bits: 9 })
        ));
    }
}
