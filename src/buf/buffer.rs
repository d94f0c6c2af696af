//! Bounded byte window with optional conduit backing.
//!
//! # Invariants
//! - `0 <= position <= limit <= capacity` after every public call.
//! - `readable() == limit - position`; `writable() == capacity - limit`.
//! - Compaction discards only already-read bytes (`[0, position)`).
//!
//! # Slice aliasing
//! `get`/`peek`/`as_slice` and the delegate windows are borrowed views into
//! the backing region. Any subsequent mutating call (compress, flush, fill,
//! append, ...) invalidates them; the borrow checker enforces exactly this
//! contract, so no defensive copies are made anywhere.
//!
//! # Modes
//! The same type serves three runtime modes: pure memory (no conduit, all
//! over/underflow fatal), conduit-backed (reads auto-fill, writes
//! auto-drain), and pre-populated memory that may be bound to a conduit
//! later.

use std::fmt;

use super::conduit::{Conduit, Style, EOF};
use super::error::{BufferError, BufferResult};

/// Smallest working window `fill` must be able to offer a conduit. Conduit
/// filters need room to make progress; anything tighter than this cannot.
pub const MIN_FILL_WINDOW: usize = 32;

/// Dual-mode byte buffer: a fixed window over memory, optionally mediating a
/// conduit.
///
/// # Examples
/// ```
/// use bedrock_rs::buf::{scan, Buffer};
///
/// let mut buffer = Buffer::from_bytes(&b"alpha\nbeta\n"[..]);
/// assert!(buffer.next(scan::lines()).unwrap());
/// assert_eq!(buffer.position(), 6);
/// ```
pub struct Buffer {
    data: Box<[u8]>,
    position: usize,
    limit: usize,
    style: Style,
    conduit: Option<Box<dyn Conduit>>,
}

impl Buffer {
    /// An empty buffer over `capacity` zeroed bytes; pure-memory mode.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            position: 0,
            limit: 0,
            style: Style::Raw,
            conduit: None,
        }
    }

    /// A buffer over an externally supplied region, fully readable.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = bytes.into();
        let limit = data.len();
        Self {
            data: data.into_boxed_slice(),
            position: 0,
            limit,
            style: Style::Raw,
            conduit: None,
        }
    }

    /// A buffer bound to `conduit`: capacity from its preferred size, style
    /// from its textuality.
    pub fn bound(conduit: Box<dyn Conduit>) -> Self {
        let mut buffer = Self::with_capacity(conduit.buffer_size());
        buffer.bind(conduit);
        buffer
    }

    /// Attaches a conduit to an existing buffer, inheriting its style.
    pub fn bind(&mut self, conduit: Box<dyn Conduit>) {
        self.style = if conduit.is_textual() {
            Style::Text
        } else {
            Style::Binary
        };
        self.conduit = Some(conduit);
    }

    /// Detaches and returns the conduit, if any. Content and style are left
    /// as they are.
    pub fn unbind(&mut self) -> Option<Box<dyn Conduit>> {
        self.conduit.take()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes available to read: `limit - position`.
    #[inline]
    pub fn readable(&self) -> usize {
        self.limit - self.position
    }

    /// Bytes available to write: `capacity - limit`.
    #[inline]
    pub fn writable(&self) -> usize {
        self.data.len() - self.limit
    }

    #[inline]
    pub fn style(&self) -> Style {
        self.style
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.conduit.is_some()
    }

    /// The current readable window, without consuming it.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.position..self.limit]
    }

    /// Reads exactly `count` bytes, consuming them.
    ///
    /// When the window is short: a request beyond capacity or on an unbound
    /// buffer is an underflow; otherwise the buffer compresses and refills
    /// from the conduit until `count` bytes are present, reporting `ReadEof`
    /// if the flow ends first.
    pub fn get(&mut self, count: usize) -> BufferResult<&[u8]> {
        self.window(count, true)
    }

    /// Reads exactly `count` bytes without consuming them. Same underflow
    /// and refill behavior as [`get`](Self::get).
    pub fn peek(&mut self, count: usize) -> BufferResult<&[u8]> {
        self.window(count, false)
    }

    /// Copies up to `dst.len()` bytes out: buffered content first, then the
    /// remainder straight from the conduit when one is bound. Returns bytes
    /// produced.
    pub fn read_into(&mut self, dst: &mut [u8]) -> usize {
        let have = self.readable().min(dst.len());
        dst[..have].copy_from_slice(&self.data[self.position..self.position + have]);
        self.position += have;

        let mut total = have;
        if total < dst.len() {
            if let Some(conduit) = self.conduit.as_deref_mut() {
                let got = conduit.read(&mut dst[total..]);
                if got != EOF {
                    total += got;
                }
            }
        }
        total
    }

    /// Appends `src` behind the current content.
    ///
    /// On insufficient space with a conduit bound, the buffered content is
    /// flushed first; a `src` larger than the whole capacity then bypasses
    /// the buffer and goes straight to the conduit. Without a conduit the
    /// shortfall is an overflow.
    pub fn append(&mut self, src: &[u8]) -> BufferResult<()> {
        if src.len() <= self.writable() {
            self.data[self.limit..self.limit + src.len()].copy_from_slice(src);
            self.limit += src.len();
            return Ok(());
        }
        if self.conduit.is_none() {
            return Err(BufferError::Overflow {
                requested: src.len(),
                writable: self.writable(),
            });
        }

        self.flush()?;
        if src.len() > self.data.len() {
            let flushed = match self.conduit.as_deref_mut() {
                Some(conduit) => conduit.flush(src),
                None => false,
            };
            return if flushed {
                Ok(())
            } else {
                Err(BufferError::WriteEof)
            };
        }
        self.data[..src.len()].copy_from_slice(src);
        self.limit = src.len();
        Ok(())
    }

    /// Consumes `count` bytes forward, or rewinds by `-count` (clamped to
    /// the already-read prefix) when negative.
    pub fn skip(&mut self, count: isize) -> BufferResult<()> {
        if count < 0 {
            let back = count.unsigned_abs().min(self.position);
            self.position -= back;
            return Ok(());
        }
        self.get(count as usize)?;
        Ok(())
    }

    /// Moves unread content to offset zero, discarding the read prefix.
    /// Idempotent; the ranges may overlap (memmove semantics).
    pub fn compress(&mut self) {
        if self.position == 0 {
            return;
        }
        let readable = self.readable();
        if readable > 0 {
            self.data.copy_within(self.position..self.limit, 0);
        }
        self.position = 0;
        self.limit = readable;
    }

    /// Discards all content.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = 0;
    }

    /// Sets `limit` to `extent` when it fits the capacity; `position` is
    /// clamped so the positional invariant survives. Returns whether the
    /// truncation happened.
    pub fn truncate(&mut self, extent: usize) -> bool {
        if extent > self.data.len() {
            return false;
        }
        self.limit = extent;
        self.position = self.position.min(extent);
        true
    }

    /// Hands the entire readable content to the conduit and clears the
    /// buffer. A partial or refused consume is a `WriteEof`. Without a
    /// conduit this is a no-op.
    pub fn flush(&mut self) -> BufferResult<()> {
        let flushed = match self.conduit.as_deref_mut() {
            Some(conduit) => conduit.flush(&self.data[self.position..self.limit]),
            None => return Ok(()),
        };
        if !flushed {
            return Err(BufferError::WriteEof);
        }
        self.clear();
        Ok(())
    }

    /// Writes as much as the conduit will accept this call, then compresses.
    /// Partial acceptance is normal; only an `EOF` answer is an error.
    pub fn drain(&mut self) -> BufferResult<usize> {
        let wrote = match self.conduit.as_deref_mut() {
            Some(conduit) => conduit.write(&self.data[self.position..self.limit]),
            None => {
                return Err(BufferError::Overflow {
                    requested: self.readable(),
                    writable: 0,
                })
            }
        };
        if wrote == EOF {
            return Err(BufferError::WriteEof);
        }
        self.position += wrote;
        self.compress();
        Ok(wrote)
    }

    /// Refills from the bound conduit; see [`fill_from`](Self::fill_from).
    pub fn fill(&mut self) -> BufferResult<usize> {
        let mut conduit = match self.conduit.take() {
            Some(conduit) => conduit,
            None => {
                return Err(BufferError::Underflow {
                    requested: MIN_FILL_WINDOW,
                    capacity: self.data.len(),
                })
            }
        };
        let result = self.fill_from(conduit.as_mut());
        self.conduit = Some(conduit);
        result
    }

    /// Asks `conduit` to fill the writable region, first clearing an empty
    /// buffer or compressing a cramped one. At least [`MIN_FILL_WINDOW`]
    /// bytes of room are required. Returns bytes produced, or `Ok(EOF)` when
    /// the flow has ended.
    pub fn fill_from(&mut self, conduit: &mut dyn Conduit) -> BufferResult<usize> {
        if self.readable() == 0 {
            self.clear();
        } else if self.writable() < MIN_FILL_WINDOW {
            self.compress();
        }
        if self.writable() < MIN_FILL_WINDOW {
            return Err(BufferError::WindowTooSmall {
                writable: self.writable(),
            });
        }
        let got = conduit.fill(&mut self.data[self.limit..]);
        if got != EOF {
            self.limit += got;
        }
        Ok(got)
    }

    /// Tokenising primitive: feeds the readable window to `scan` until it
    /// reports a match, refilling from the conduit between attempts.
    ///
    /// `scan` answers with bytes consumed through its delimiter, or [`EOF`]
    /// for "no match yet". On a match the window advances and `Ok(true)`
    /// returns. When no more bytes can ever match (unbound buffer, or the
    /// conduit ends), the remainder is skipped and `Ok(false)` returns. A
    /// token that cannot fit the whole capacity is `TokenTooLarge`.
    pub fn next<S>(&mut self, mut scan: S) -> BufferResult<bool>
    where
        S: FnMut(&[u8]) -> usize,
    {
        loop {
            let consumed = scan(&self.data[self.position..self.limit]);
            if consumed != EOF {
                assert!(
                    consumed <= self.readable(),
                    "scanner consumed past the readable window"
                );
                self.position += consumed;
                return Ok(true);
            }

            if self.conduit.is_none() {
                self.position = self.limit;
                return Ok(false);
            }
            if self.position > 0 {
                self.compress();
            } else if self.writable() == 0 {
                return Err(BufferError::TokenTooLarge {
                    capacity: self.data.len(),
                });
            }
            let got = match self.conduit.as_deref_mut() {
                Some(conduit) => conduit.read(&mut self.data[self.limit..]),
                None => EOF,
            };
            if got == EOF {
                self.position = self.limit;
                return Ok(false);
            }
            self.limit += got;
        }
    }

    /// Hands the readable window to `reader`, which answers with bytes
    /// consumed or [`EOF`]. The read cursor advances on a non-`EOF` answer;
    /// the answer is returned either way.
    pub fn read_with<F>(&mut self, reader: F) -> usize
    where
        F: FnOnce(&[u8]) -> usize,
    {
        let consumed = reader(&self.data[self.position..self.limit]);
        if consumed != EOF {
            assert!(
                consumed <= self.readable(),
                "reader consumed past the readable window"
            );
            self.position += consumed;
        }
        consumed
    }

    /// Hands the writable region to `writer`, which answers with bytes
    /// produced or [`EOF`]. The write cursor advances on a non-`EOF` answer;
    /// the answer is returned either way.
    pub fn write_with<F>(&mut self, writer: F) -> usize
    where
        F: FnOnce(&mut [u8]) -> usize,
    {
        let produced = writer(&mut self.data[self.limit..]);
        if produced != EOF {
            assert!(
                produced <= self.data.len() - self.limit,
                "writer produced past the writable region"
            );
            self.limit += produced;
        }
        produced
    }

    /// Blocks (through the conduit) until at least one byte is readable.
    pub fn wait(&mut self) -> BufferResult<()> {
        self.peek(1)?;
        Ok(())
    }

    fn window(&mut self, count: usize, eat: bool) -> BufferResult<&[u8]> {
        if count > self.readable() {
            if count > self.data.len() || self.conduit.is_none() {
                return Err(BufferError::Underflow {
                    requested: count,
                    capacity: self.data.len(),
                });
            }
            self.compress();
            while self.readable() < count {
                let got = match self.conduit.as_deref_mut() {
                    Some(conduit) => conduit.read(&mut self.data[self.limit..]),
                    None => EOF,
                };
                if got == EOF {
                    return Err(BufferError::ReadEof);
                }
                self.limit += got;
            }
        }
        let start = self.position;
        if eat {
            self.position += count;
        }
        Ok(&self.data[start..start + count])
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("capacity", &self.data.len())
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("style", &self.style)
            .field("bound", &self.conduit.is_some())
            .finish()
    }
}
