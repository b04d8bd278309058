use std::{fmt::Display, ops::Range};

/// Byte range into the text a token or node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SrcSpan {
    pub start: u32,
    pub end: u32,
}

impl SrcSpan {
    pub fn from(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn shifted(self, offset: u32) -> Self {
        Self::from(self.start + offset, self.end + offset)
    }

    /// The span as a byte range, cut down to fit a text of `len` bytes.
    pub fn clamped(self, len: usize) -> Range<usize> {
        let end = (self.end as usize).min(len);
        (self.start as usize).min(end)..end
    }
}

impl Display for SrcSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
