//! Wire format for persisted broker records.
//!
//! A durable record is `[u32 BE format tag][record bytes...]`. Tag zero
//! marks the native header format understood by the AMQP 1.0 plugin; any
//! other tag belongs to a different protocol's encoding and is left for
//! the next recoverer in the chain.
//!
//! Parsing never panics: every read is bounds-checked and every failure is
//! a typed [`CodecError`].

pub mod buffer;
pub mod header;

pub use buffer::RecordBuffer;
pub use header::{decode_header, encode_header, encoded_len};

/// Leading store tag identifying the native header format.
pub const AMQP_FORMAT_TAG: u32 = 0;

/// Decode and encode failures for persisted records.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// A read ran past the end of the record.
    #[error("buffer underflow: need {need} bytes, {got} available")]
    Underflow { need: usize, got: usize },

    /// The record claimed the native format but the header would not
    /// decode. Data-integrity fault; must never be silently swallowed.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// A header field is too long for its length prefix.
    #[error("header field {field} is {len} bytes, limit is {limit}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        limit: usize,
    },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
