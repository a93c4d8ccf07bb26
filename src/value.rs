//! Types for representing the value returned by a load.

use crate::error::ValueError;

/// Maximum number of bytes in a [`LoadValue`].
pub const MAX_VALUE_BYTES: usize = 8;

/// The data returned by a single load (at most 8 bytes).
///
/// Unused bytes are always zero, so two values compare equal exactly when
/// they have the same size and the same bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LoadValue {
    data: [u8; MAX_VALUE_BYTES],
    size: u8,
}
impl LoadValue {
    /// Create a value from some bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        if bytes.len() > MAX_VALUE_BYTES {
            return Err(ValueError::TooLarge { len: bytes.len() });
        }
        let mut data = [0; MAX_VALUE_BYTES];
        data[..bytes.len()].copy_from_slice(bytes);
        Ok(Self { data, size: bytes.len() as u8 })
    }

    /// Create a `size`-byte value from the low bytes of `v` (little-endian).
    pub fn from_u64(v: u64, size: usize) -> Result<Self, ValueError> {
        if size > MAX_VALUE_BYTES {
            return Err(ValueError::TooLarge { len: size });
        }
        Self::from_slice(&v.to_le_bytes()[..size])
    }

    pub fn len(&self) -> usize { self.size as usize }
    pub fn is_empty(&self) -> bool { self.size == 0 }

    pub fn as_bytes(&self) -> &[u8] { &self.data[..self.len()] }

    /// Interpret the value as a little-endian integer.
    pub fn as_u64(&self) -> u64 { u64::from_le_bytes(self.data) }
}

impl std::fmt::Debug for LoadValue {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "LoadValue({:?})", self.as_bytes())
    }
}

impl TryFrom<&[u8]> for LoadValue {
    type Error = ValueError;
    fn try_from(bytes: &[u8]) -> Result<Self, ValueError> {
        Self::from_slice(bytes)
    }
}

impl From<u64> for LoadValue {
    fn from(v: u64) -> Self {
        Self { data: v.to_le_bytes(), size: MAX_VALUE_BYTES as u8 }
    }
}

impl From<u32> for LoadValue {
    fn from(v: u32) -> Self {
        let mut data = [0; MAX_VALUE_BYTES];
        data[..4].copy_from_slice(&v.to_le_bytes());
        Self { data, size: 4 }
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn too_large() {
        let bytes = [0u8; 9];
        assert_eq!(
            LoadValue::from_slice(&bytes),
            Err(ValueError::TooLarge { len: 9 })
        );
        assert!(LoadValue::from_u64(1, 16).is_err());
    }

    #[test]
    fn size_is_part_of_identity() {
        let a = LoadValue::from_u64(0x1234, 2).unwrap();
        let b = LoadValue::from_u64(0x1234, 4).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.as_u64(), b.as_u64());
        assert_eq!(a.as_bytes(), &[0x34, 0x12]);
    }

    #[test]
    fn truncates_high_bytes() {
        let v = LoadValue::from_u64(0xdead_beef, 2).unwrap();
        assert_eq!(v.as_u64(), 0xbeef);
        assert_eq!(LoadValue::from(7u32).len(), 4);
    }
}
