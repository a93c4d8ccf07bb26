//! Memory access traces used to drive a predictor.

pub mod synth;

use std::path::Path;

use crate::{ Addr, LoadValue };
use crate::error::TraceError;

/// The kind of memory access.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemKind {
    Load = 0,
    Store = 1,
}

/// A single memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemRecord {
    pub kind: MemKind,
    /// Program counter of the instruction
    pub pc: Addr,
    /// Data address
    pub addr: Addr,
    /// The value loaded or stored
    pub value: LoadValue,
}
impl MemRecord {
    pub fn load(pc: Addr, addr: Addr, value: LoadValue) -> Self {
        Self { kind: MemKind::Load, pc, addr, value }
    }
    pub fn store(pc: Addr, addr: Addr, value: LoadValue) -> Self {
        Self { kind: MemKind::Store, pc, addr, value }
    }
    pub fn is_load(&self) -> bool { self.kind == MemKind::Load }
    pub fn is_store(&self) -> bool { self.kind == MemKind::Store }
}

/// Size of an encoded [MemRecord] in bytes.
///
/// ```text
/// 0      1      2         8         16          24           32
/// | kind | size | padding | pc (le) | addr (le) | value (le) |
/// ```
pub const RECORD_BYTES: usize = 32;

fn read_u64(buf: &[u8]) -> u64 {
    let mut b = [0u8; 8];
    b.copy_from_slice(&buf[..8]);
    u64::from_le_bytes(b)
}

/// A trace of [MemRecord] read from (or written to) the binary format.
#[derive(Clone, Debug, Default)]
pub struct BinaryTrace {
    pub name: String,
    pub data: Vec<MemRecord>,
}
impl BinaryTrace {
    pub fn new(name: impl ToString, data: Vec<MemRecord>) -> Self {
        Self { name: name.to_string(), data }
    }

    /// Decode a trace from a buffer.
    pub fn from_bytes(name: impl ToString, buf: &[u8])
        -> Result<Self, TraceError>
    {
        if buf.len() % RECORD_BYTES != 0 {
            return Err(TraceError::Truncated { len: buf.len() });
        }

        let mut data = Vec::with_capacity(buf.len() / RECORD_BYTES);
        for (i, rec) in buf.chunks_exact(RECORD_BYTES).enumerate() {
            let offset = i * RECORD_BYTES;
            let kind = match rec[0] {
                0 => MemKind::Load,
                1 => MemKind::Store,
                kind => return Err(TraceError::BadKind { kind, offset }),
            };
            let size = rec[1] as usize;
            let value = LoadValue::from_u64(read_u64(&rec[24..]), size)
                .map_err(|source| TraceError::Value { offset, source })?;
            data.push(MemRecord {
                kind,
                pc: read_u64(&rec[8..]) as Addr,
                addr: read_u64(&rec[16..]) as Addr,
                value,
            });
        }
        Ok(Self { name: name.to_string(), data })
    }

    /// Read a trace from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let buf = std::fs::read(path)?;
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, &buf)
    }

    /// Encode this trace.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.data.len() * RECORD_BYTES);
        for r in self.data.iter() {
            let mut rec = [0u8; RECORD_BYTES];
            rec[0] = r.kind as u8;
            rec[1] = r.value.len() as u8;
            rec[8..16].copy_from_slice(&(r.pc as u64).to_le_bytes());
            rec[16..24].copy_from_slice(&(r.addr as u64).to_le_bytes());
            rec[24..32].copy_from_slice(&r.value.as_u64().to_le_bytes());
            buf.extend_from_slice(&rec);
        }
        buf
    }

    /// Write this trace to a file.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), TraceError> {
        std::fs::write(path, self.to_bytes())?;
        Ok(())
    }

    /// Return the number of records
    pub fn num_entries(&self) -> usize { self.data.len() }

    pub fn name(&self) -> &str { &self.name }

    /// Return a slice of records.
    pub fn as_slice(&self) -> &[MemRecord] { &self.data }

    /// Number of loads in the trace.
    pub fn num_loads(&self) -> usize {
        self.data.iter().filter(|r| r.is_load()).count()
    }
}

/// An iterator over a list of trace files.
pub struct BinaryTraceSet {
    /// A list of filenames
    pub files: Vec<String>,
    cur: usize,
}
impl BinaryTraceSet {
    pub fn new() -> Self {
        Self { files: Vec::new(), cur: 0 }
    }

    pub fn new_from_slice(strings: &[String]) -> Self {
        Self { files: strings.to_vec(), cur: 0 }
    }

    pub fn add_file(&mut self, s: impl ToString) {
        self.files.push(s.to_string());
    }
}
impl Default for BinaryTraceSet {
    fn default() -> Self { Self::new() }
}
impl Iterator for BinaryTraceSet {
    type Item = Result<BinaryTrace, TraceError>;
    fn next(&mut self) -> Option<Self::Item> {
        let file = self.files.get(self.cur)?;
        self.cur += 1;
        Some(BinaryTrace::from_file(file))
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn sample() -> BinaryTrace {
        BinaryTrace::new("sample", vec![
            MemRecord::load(0x1000, 0x8000, LoadValue::from(5u32)),
            MemRecord::store(0x1004, 0x8000, LoadValue::from(6u32)),
            MemRecord::load(0x1008, 0x8008,
                LoadValue::from_u64(0xff, 1).unwrap()),
        ])
    }

    #[test]
    fn encode_decode() {
        let t = sample();
        let bytes = t.to_bytes();
        assert_eq!(bytes.len(), 3 * RECORD_BYTES);
        let u = BinaryTrace::from_bytes("sample", &bytes).unwrap();
        assert_eq!(u.data, t.data);
        assert_eq!(u.num_loads(), 2);
    }

    #[test]
    fn rejects_truncated() {
        let mut bytes = sample().to_bytes();
        bytes.pop();
        assert!(matches!(
            BinaryTrace::from_bytes("x", &bytes),
            Err(TraceError::Truncated { len: 95 })
        ));
    }

    #[test]
    fn rejects_bad_kind() {
        let mut bytes = sample().to_bytes();
        bytes[RECORD_BYTES] = 7;
        assert!(matches!(
            BinaryTrace::from_bytes("x", &bytes),
            Err(TraceError::BadKind { kind: 7, offset: 32 })
        ));
    }

    #[test]
    fn rejects_oversized_value() {
        let mut bytes = sample().to_bytes();
        bytes[1] = 9;
        assert!(matches!(
            BinaryTrace::from_bytes("x", &bytes),
            Err(TraceError::Value { offset: 0, .. })
        ));
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("lvpred-trace-{}.bin", std::process::id()));
        let t = sample();
        t.write_file(&path).unwrap();

        let mut set = BinaryTraceSet::new();
        set.add_file(path.display());
        let u = set.next().unwrap().unwrap();
        assert!(set.next().is_none());
        std::fs::remove_file(&path).unwrap();

        assert_eq!(u.data, t.data);
        assert!(u.name().starts_with("lvpred-trace-"));
    }
}
