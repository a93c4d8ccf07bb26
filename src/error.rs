//! Error types.

use thiserror::Error;

/// Errors detected while building a predictor from some configuration.
///
/// A predictor is never usable when one of these is returned.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {table} size {size}: must be a non-zero power of two")]
    NotPowerOfTwo { table: &'static str, size: usize },

    #[error("invalid LCT counter width: must be at least one bit")]
    ZeroWidthCounter,

    #[error("invalid LCT counter width {bits}: at most 8 bits are supported")]
    CounterTooWide { bits: u8 },

    #[error("invalid CVU size: must have at least one entry")]
    EmptyCVU,

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors produced when building a [`crate::LoadValue`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("load value of {len} bytes does not fit in 8 bytes")]
    TooLarge { len: usize },
}

/// Errors produced while reading or writing a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("trace I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace length {len} is not a multiple of the record size")]
    Truncated { len: usize },

    #[error("unknown record kind {kind} at offset {offset:#x}")]
    BadKind { kind: u8, offset: usize },

    #[error("bad value in record at offset {offset:#x}: {source}")]
    Value { offset: usize, source: ValueError },
}
