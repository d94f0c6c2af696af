//! Dual-mode byte buffer over an external source/sink ("conduit").
//!
//! # Scope
//! A bounded byte window that can be read, written, sliced without copying,
//! refilled from a conduit on underflow, drained to a conduit on overflow,
//! compacted in place, and tokenised by caller-supplied scanners.
//!
//! # Design themes
//! - Slice-returning operations borrow the backing region; any mutating call
//!   invalidates them, which the borrow checker enforces.
//! - One failure channel ([`BufferError`]) covers capacity, conduit-EOF, and
//!   configuration conditions; errors are surfaced, never retried.
//! - Conduits and scanners share a single sentinel ([`EOF`]) so scanners stay
//!   interoperable across buffer implementations.
//!
//! # Module map
//! - `buffer`: the `Buffer` itself.
//! - `conduit`: the `Conduit` trait, `EOF`, and the `Style` marker.
//! - `error`: `BufferError` / `BufferResult`.
//! - `memory`: `MemoryConduit`, an in-memory source/sink.
//! - `file`: `FileConduit`, a `std::fs::File` adapter.
//! - `scan`: `memchr`-backed scanner constructors for `Buffer::next`.

pub mod buffer;
pub mod conduit;
pub mod error;
pub mod file;
pub mod memory;
pub mod scan;

pub use buffer::{Buffer, MIN_FILL_WINDOW};
pub use conduit::{Conduit, Style, EOF};
pub use error::{BufferError, BufferResult};
pub use file::FileConduit;
pub use memory::MemoryConduit;
