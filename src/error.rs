//! Crate-wide error types
//!
//! Every error that can surface during frame decoding or event dispatch.
//! All variants are `Clone` because a failure cause travels inside a
//! published `DecodeFailure` event rather than up a call stack.

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Payload could not be decoded from the wire format
    Wire(WireError),
    /// A registered mapping failed to construct its event
    Mapping {
        /// Canonical tag of the frame being mapped
        tag: String,
        /// What went wrong
        reason: String,
    },
    /// A subscriber callback reported a failure
    Subscriber(String),
    /// Client settings failed validation at build time
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Wire(e) => write!(f, "Wire decode error: {}", e),
            Error::Mapping { tag, reason } => {
                write!(f, "Mapping failed for {}: {}", tag, reason)
            }
            Error::Subscriber(msg) => write!(f, "Subscriber error: {}", msg),
            Error::Config(msg) => write!(f, "Invalid client settings: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WireError> for Error {
    fn from(e: WireError) -> Self {
        Error::Wire(e)
    }
}

/// Error type for wire-format decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Buffer ended in the middle of a value
    UnexpectedEof,
    /// Varint longer than 10 bytes
    VarintOverflow,
    /// Unknown wire type in a field key
    InvalidWireType(u8),
    /// A field that must be present was missing
    MissingField(u32),
    /// A length-delimited field was not valid UTF-8
    InvalidUtf8,
}

impl std::fmt::Display for WireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WireError::UnexpectedEof => write!(f, "Unexpected end of buffer"),
            WireError::VarintOverflow => write!(f, "Varint overflow"),
            WireError::InvalidWireType(t) => write!(f, "Invalid wire type: {}", t),
            WireError::MissingField(n) => write!(f, "Missing required field: {}", n),
            WireError::InvalidUtf8 => write!(f, "Invalid UTF-8 in string field"),
        }
    }
}

impl std::error::Error for WireError {}
