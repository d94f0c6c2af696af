//! External byte source/sink interface.
//!
//! A conduit moves bytes between a buffer and the outside world. It carries
//! no error channel of its own: every transfer reports a byte count or the
//! [`EOF`] sentinel, and the buffer translates sentinels into its own error
//! categories. The same sentinel doubles as the "no match yet" answer from
//! scanners, so caller-supplied functions speak one convention.

/// Sentinel byte count: end of flow for conduits, "need more data" for
/// scanners. Never a valid transfer size.
pub const EOF: usize = usize::MAX;

/// Content discipline a buffer advertises.
///
/// Purely descriptive: `Raw` for plain memory buffers, `Text`/`Binary`
/// inherited from the conduit a buffer is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Raw,
    Text,
    Binary,
}

/// A byte source/sink with a preferred transfer size.
///
/// Conduits are owned externally and merely borrowed into buffers; a buffer
/// never closes one. Implementations are single-owner and blocking: a `read`
/// returns at least one byte or `EOF`, and a zero-length return is reserved
/// for zero-length requests.
pub trait Conduit {
    /// Preferred transfer size; a buffer bound at construction adopts it as
    /// its capacity.
    fn buffer_size(&self) -> usize;

    /// Whether the flow is line-oriented text rather than raw binary.
    fn is_textual(&self) -> bool;

    /// Reads into `dst`, returning bytes read or [`EOF`].
    fn read(&mut self, dst: &mut [u8]) -> usize;

    /// Writes from `src`, returning bytes written or [`EOF`].
    fn write(&mut self, src: &[u8]) -> usize;

    /// Consumes all of `src`, returning `false` if the conduit refuses or
    /// ends mid-way.
    fn flush(&mut self, src: &[u8]) -> bool {
        let mut from = 0;
        while from < src.len() {
            let wrote = self.write(&src[from..]);
            if wrote == EOF || wrote == 0 {
                return false;
            }
            from += wrote;
        }
        true
    }

    /// Direct-read convenience; identical to `read` unless an implementation
    /// has a cheaper path.
    fn fill(&mut self, dst: &mut [u8]) -> usize {
        self.read(dst)
    }
}
