//! Scanner constructors for [`Buffer::next`].
//!
//! A scanner inspects the readable window and answers with the byte count
//! consumed through the end of its delimiter, or [`EOF`] for "no match yet,
//! feed me more". These constructors cover the universal cases; anything
//! fancier is an ordinary closure.
//!
//! [`Buffer::next`]: super::Buffer::next

use memchr::{memchr, memmem};

use super::conduit::EOF;

/// Scans for a single delimiter byte; consumes through the delimiter.
pub fn delimiter(delim: u8) -> impl FnMut(&[u8]) -> usize {
    move |window| memchr(delim, window).map_or(EOF, |at| at + 1)
}

/// Line scanner: a `delimiter` over `\n`.
pub fn lines() -> impl FnMut(&[u8]) -> usize {
    delimiter(b'\n')
}

/// Scans for a multi-byte needle; consumes through the needle.
///
/// # Panics
/// Panics if `needle` is empty.
pub fn pattern(needle: &[u8]) -> impl FnMut(&[u8]) -> usize + '_ {
    assert!(!needle.is_empty(), "pattern needle must be non-empty");
    let finder = memmem::Finder::new(needle);
    move |window| {
        finder
            .find(window)
            .map_or(EOF, |at| at + finder.needle().len())
    }
}
