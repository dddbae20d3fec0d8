//! Selection ranges over a markdown buffer
//!
//! A [`SelectionRange`] is the `(start, end)` pair a text-input widget reports:
//! inclusive start, exclusive end, with `start == end` meaning a caret.
//!
//! Offsets are UTF-8 byte offsets into the buffer `String`. Hosts whose widgets
//! report UTF-16 code units (browser text areas) convert at the boundary with
//! [`SelectionRange::from_utf16`] and [`SelectionRange::to_utf16`].
//!
//! # Example
//!
//! ```ignore
//! use quill_core::selection::SelectionRange;
//!
//! // Caret at position 10
//! let caret = SelectionRange::caret(10);
//!
//! // "hello" in "hello world"
//! let sel = SelectionRange::new(0, 5);
//! assert_eq!(sel.slice("hello world"), "hello");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::{max, min};
use std::ops::Range;

/// A highlighted span (or caret) in the buffer.
///
/// `start <= end` always holds; deserialized offsets are ordered the same way
/// [`SelectionRange::new`] orders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSelection")]
pub struct SelectionRange {
    /// First selected byte
    pub start: usize,
    /// One past the last selected byte
    pub end: usize,
}

/// Wire shape of a selection before its offsets are ordered.
#[derive(Deserialize)]
struct RawSelection {
    start: usize,
    end: usize,
}

impl From<RawSelection> for SelectionRange {
    fn from(raw: RawSelection) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl SelectionRange {
    /// Create a selection between two offsets, ordering them if needed.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: min(a, b),
            end: max(a, b),
        }
    }

    /// Create a caret (zero-width selection) at the given position.
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// Check if this selection is a caret.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Get the length of the selection in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the selection is empty (caret).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the selection as a Range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Move both ends forward by `delta` bytes.
    pub fn shift(&self, delta: usize) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Collapse to a caret at the end.
    pub fn collapse_to_end(&self) -> Self {
        Self::caret(self.end)
    }

    /// Clamp the selection into `buffer`.
    ///
    /// Offsets past the end are pulled back to `buffer.len()` and offsets that
    /// fall inside a multi-byte character snap back to that character's start,
    /// so the result can always be used to slice `buffer`.
    pub fn clamp_to(&self, buffer: &str) -> Self {
        let start = floor_char_boundary(buffer, self.start);
        let end = floor_char_boundary(buffer, self.end);
        Self::new(start, end)
    }

    /// The selected text. The selection must already be clamped to `buffer`.
    pub fn slice<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.range()]
    }

    /// Build a selection from UTF-16 code-unit offsets.
    pub fn from_utf16(buffer: &str, start: usize, end: usize) -> Self {
        Self::new(utf16_to_byte(buffer, start), utf16_to_byte(buffer, end))
    }

    /// Express this selection as UTF-16 code-unit offsets.
    pub fn to_utf16(&self, buffer: &str) -> (usize, usize) {
        let clamped = self.clamp_to(buffer);
        (
            byte_to_utf16(buffer, clamped.start),
            byte_to_utf16(buffer, clamped.end),
        )
    }
}

impl Default for SelectionRange {
    fn default() -> Self {
        SelectionRange::caret(0)
    }
}

impl From<Range<usize>> for SelectionRange {
    fn from(range: Range<usize>) -> Self {
        SelectionRange::new(range.start, range.end)
    }
}

impl From<usize> for SelectionRange {
    fn from(pos: usize) -> Self {
        SelectionRange::caret(pos)
    }
}

/// Largest char boundary in `buffer` that is `<= pos`.
fn floor_char_boundary(buffer: &str, pos: usize) -> usize {
    if pos >= buffer.len() {
        return buffer.len();
    }
    let mut pos = pos;
    while !buffer.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Convert a UTF-16 code-unit offset into a byte offset, clamping past the end.
///
/// An offset that lands between the two halves of a surrogate pair maps to the
/// start of that character.
pub fn utf16_to_byte(buffer: &str, offset: usize) -> usize {
    let mut units = 0;
    for (byte_idx, ch) in buffer.char_indices() {
        let next = units + ch.len_utf16();
        if next > offset {
            return byte_idx;
        }
        units = next;
    }
    buffer.len()
}

/// Convert a byte offset into a UTF-16 code-unit offset.
pub fn byte_to_utf16(buffer: &str, offset: usize) -> usize {
    let offset = floor_char_boundary(buffer, offset);
    buffer[..offset].chars().map(char::len_utf16).sum()
}
