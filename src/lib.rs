//! Foundation primitives with explicit memory policy and bounded byte windows.
//!
//! Two independent components, both leaves in any dependency graph:
//! - [`container`]: a separately-chained hash set parameterised by hash, reap,
//!   and node-allocation policies, with epoch-based cursor invalidation.
//! - [`buf`]: a dual-mode byte buffer that mediates between in-memory byte
//!   sequences and an external source/sink (a *conduit*), with zero-copy slice
//!   access and scanner-driven tokenisation.
//!
//! Design themes:
//! - Single-owner, non-reentrant types; no operation suspends or retries.
//! - Tight positional/structural invariants, asserted in `check()` and debug
//!   builds rather than surfaced as recoverable errors.
//! - Sentinel-value conventions (`NIL` links, `EOF` byte counts) shared across
//!   policies so caller-supplied functions stay interoperable.
//!
//! Neither component depends on the other: `container` routes storage through
//! its heap policy, `buf` routes overflow/underflow through its conduit.

pub mod buf;
pub mod container;
