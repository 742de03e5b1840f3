//! Token gate: suppress tool-call markup from the outward token feed.
//!
//! The model's chunk boundaries are arbitrary, so a sentinel can arrive
//! split across chunks. The gate holds back any trailing text that could be
//! the start of a sentinel until the next chunk disambiguates it. Everything
//! between the sentinels (and the sentinels themselves) is dropped.

use crate::tools::{TOOL_CALL_BEGIN, TOOL_CALL_END};

/// Incremental scanner with two states: outside or inside a tool-call
/// region. Feed chunks in order; call [`TokenGate::flush`] at end of
/// message to release a held-back tail that never became a sentinel.
#[derive(Debug, Default)]
pub struct TokenGate {
    inside: bool,
    pending: String,
}

impl TokenGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes one chunk and returns the text that is safe to surface.
    pub fn feed(&mut self, chunk: &str) -> String {
        self.pending.push_str(chunk);
        let mut visible = String::new();
        loop {
            if self.inside {
                if let Some(idx) = self.pending.find(TOOL_CALL_END) {
                    self.pending.drain(..idx + TOOL_CALL_END.len());
                    self.inside = false;
                } else {
                    // Drop buffered call content, keep only a tail that could
                    // still become the closing sentinel.
                    let keep = partial_sentinel_len(&self.pending, TOOL_CALL_END);
                    self.pending.drain(..self.pending.len() - keep);
                    return visible;
                }
            } else if let Some(idx) = self.pending.find(TOOL_CALL_BEGIN) {
                visible.push_str(&self.pending[..idx]);
                self.pending.drain(..idx + TOOL_CALL_BEGIN.len());
                self.inside = true;
            } else {
                let keep = partial_sentinel_len(&self.pending, TOOL_CALL_BEGIN);
                let cut = self.pending.len() - keep;
                visible.push_str(&self.pending[..cut]);
                self.pending.drain(..cut);
                return visible;
            }
        }
    }

    /// End of message: a held-back tail outside a region is real text; text
    /// inside an unterminated region never surfaces.
    pub fn flush(&mut self) -> String {
        self.inside = false;
        std::mem::take(&mut self.pending)
    }
}

/// Length of the longest suffix of `buffer` that is a proper prefix of
/// `sentinel` (and could therefore complete into it with more input).
fn partial_sentinel_len(buffer: &str, sentinel: &str) -> usize {
    let max = sentinel.len().saturating_sub(1).min(buffer.len());
    for len in (1..=max).rev() {
        let start = buffer.len() - len;
        if buffer.is_char_boundary(start)
            && sentinel.as_bytes().starts_with(&buffer.as_bytes()[start..])
        {
            return len;
        }
    }
    0
}
