//! The buffer's single failure channel.
//!
//! Categories: capacity (`Underflow`, `Overflow`, `TokenTooLarge`), conduit
//! I/O (`ReadEof`, `WriteEof`), and configuration (`WindowTooSmall`). Payload
//! fields carry human-readable context and are not stable for machine
//! parsing. Structural violations are assertions, not errors; recovery is
//! entirely the caller's business.

use std::fmt;

pub type BufferResult<T> = Result<T, BufferError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BufferError {
    /// A read request exceeded capacity, or there is no conduit to fill from.
    Underflow { requested: usize, capacity: usize },
    /// A write exceeded capacity with no conduit to drain to.
    Overflow { requested: usize, writable: usize },
    /// The conduit reported end-of-flow while bytes were still owed.
    ReadEof,
    /// The conduit refused writes or reported end-of-flow mid-flush.
    WriteEof,
    /// No delimiter fits within the buffer's entire capacity.
    TokenTooLarge { capacity: usize },
    /// `fill` could not reserve its minimum working window.
    WindowTooSmall { writable: usize },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Underflow {
                requested,
                capacity,
            } => write!(
                f,
                "buffer underflow: {requested} bytes requested of a {capacity}-byte buffer"
            ),
            Self::Overflow {
                requested,
                writable,
            } => write!(
                f,
                "buffer overflow: {requested} bytes appended with {writable} writable"
            ),
            Self::ReadEof => write!(f, "end of conduit flow while reading"),
            Self::WriteEof => write!(f, "end of conduit flow while writing"),
            Self::TokenTooLarge { capacity } => {
                write!(f, "token too large: no delimiter within {capacity} bytes")
            }
            Self::WindowTooSmall { writable } => {
                write!(f, "input buffer is too small: {writable} bytes writable")
            }
        }
    }
}

impl std::error::Error for BufferError {}
