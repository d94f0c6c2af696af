//! In-memory conduit: a readable input region and an append-only output.
//!
//! Serves as the in-process pipe for tests and for code that wants conduit
//! semantics without leaving memory. Reads consume the input region until it
//! is exhausted (then report [`EOF`]); writes always succeed and accumulate
//! in the output.

use super::conduit::{Conduit, EOF};

const DEFAULT_PREFERRED: usize = 512;

pub struct MemoryConduit {
    input: Vec<u8>,
    consumed: usize,
    output: Vec<u8>,
    textual: bool,
    preferred: usize,
}

impl MemoryConduit {
    /// A pure sink: no readable input, writes accumulate.
    pub fn sink() -> Self {
        Self::with_input(Vec::new())
    }

    /// A conduit whose read side yields `input` and then reports EOF.
    pub fn with_input(input: impl Into<Vec<u8>>) -> Self {
        Self {
            input: input.into(),
            consumed: 0,
            output: Vec::new(),
            textual: false,
            preferred: DEFAULT_PREFERRED,
        }
    }

    /// Marks the flow as textual; buffers bound to it style themselves
    /// accordingly.
    pub fn textual(mut self, textual: bool) -> Self {
        self.textual = textual;
        self
    }

    /// Overrides the preferred transfer size.
    ///
    /// # Panics
    /// Panics if `preferred` is zero.
    pub fn preferred(mut self, preferred: usize) -> Self {
        assert!(preferred > 0, "preferred size must be positive");
        self.preferred = preferred;
        self
    }

    /// Input bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.input.len() - self.consumed
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.output
    }

    pub fn into_written(self) -> Vec<u8> {
        self.output
    }
}

impl Conduit for MemoryConduit {
    fn buffer_size(&self) -> usize {
        self.preferred
    }

    fn is_textual(&self) -> bool {
        self.textual
    }

    fn read(&mut self, dst: &mut [u8]) -> usize {
        if dst.is_empty() {
            return 0;
        }
        let remaining = self.remaining();
        if remaining == 0 {
            return EOF;
        }
        let take = remaining.min(dst.len());
        dst[..take].copy_from_slice(&self.input[self.consumed..self.consumed + take]);
        self.consumed += take;
        take
    }

    fn write(&mut self, src: &[u8]) -> usize {
        self.output.extend_from_slice(src);
        src.len()
    }
}
