//! Offset to line/column resolution

use crate::types::{Position, Range};
use thiserror::Error;

/// Errors raised when an offset cannot be resolved against a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    /// The offset lies past the end of the document.
    #[error("Offset {offset} is outside of source bounds (length {length})")]
    OutOfBounds { offset: usize, length: usize },

    /// A byte offset that splits a multi-byte character.
    #[error("Byte offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

/// Resolves offsets within one document to 1-based line/column positions.
///
/// Built once per document. For every line the locator records the running
/// character total up to and including that line's terminating `'\n'`;
/// resolving an offset is a binary search over those totals.
#[derive(Debug, Clone)]
pub struct Locator<'a> {
    text: &'a str,

    /// Cumulative character count at the end of each line, break included
    totals: Vec<usize>,

    /// Byte offset at which each line starts
    line_byte_starts: Vec<usize>,

    /// Total length of the document in characters
    char_len: usize,
}

impl<'a> Locator<'a> {
    /// Scan the document once and build the line tables.
    ///
    /// # Example
    ///
    /// ```
    /// use docast_source_map::Locator;
    ///
    /// let locator = Locator::new("ab\ncd");
    /// let pos = locator.position(3).unwrap();
    /// assert_eq!((pos.line, pos.column), (2, 1));
    /// ```
    pub fn new(text: &'a str) -> Self {
        let mut total = 0;
        let totals = text
            .split('\n')
            .map(|line| {
                total += line.chars().count() + 1;
                total
            })
            .collect();

        let line_byte_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();

        Locator {
            text,
            totals,
            line_byte_starts,
            char_len: text.chars().count(),
        }
    }

    /// The document this locator was built over.
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Length of the document in characters.
    pub fn len(&self) -> usize {
        self.char_len
    }

    pub fn is_empty(&self) -> bool {
        self.char_len == 0
    }

    /// Number of lines (a trailing `'\n'` starts an empty final line).
    pub fn line_count(&self) -> usize {
        self.totals.len()
    }

    /// Resolve a character offset.
    ///
    /// An offset equal to a line's cumulative total is the first character
    /// after that line's break, so it resolves to the start of the next line.
    /// The end of the document (`offset == len()`) is a valid position.
    pub fn position(&self, offset: usize) -> Result<Position, LocateError> {
        if offset > self.char_len {
            return Err(LocateError::OutOfBounds {
                offset,
                length: self.char_len,
            });
        }

        let line_index = self.totals.partition_point(|&total| total <= offset);
        let previous_total = self.line_start(line_index);

        Ok(Position {
            offset,
            line: line_index + 1,
            column: offset - previous_total + 1,
        })
    }

    /// Resolve a UTF-8 byte offset into the same character-based position.
    pub fn position_at_byte(&self, byte_offset: usize) -> Result<Position, LocateError> {
        if byte_offset > self.text.len() {
            return Err(LocateError::OutOfBounds {
                offset: byte_offset,
                length: self.text.len(),
            });
        }
        if !self.text.is_char_boundary(byte_offset) {
            return Err(LocateError::NotCharBoundary {
                offset: byte_offset,
            });
        }

        let line_index = self
            .line_byte_starts
            .partition_point(|&start| start <= byte_offset)
            - 1;
        let line_text = &self.text[self.line_byte_starts[line_index]..byte_offset];
        let column = line_text.chars().count() + 1;

        Ok(Position {
            offset: self.line_start(line_index) + column - 1,
            line: line_index + 1,
            column,
        })
    }

    /// Character offset of a 1-based line and column.
    ///
    /// Columns past the end of a line resolve to its break (or to the end of
    /// the document on the last line). Lines outside the document give `None`.
    pub fn offset_at(&self, line: usize, column: usize) -> Option<usize> {
        let line_index = line.checked_sub(1)?;
        let line_total = *self.totals.get(line_index)?;
        let last = (line_total - 1).min(self.char_len);
        Some((self.line_start(line_index) + column.saturating_sub(1)).min(last))
    }

    /// Build a range from two character offsets.
    pub fn range(&self, start: usize, end: usize) -> Result<Range, LocateError> {
        Ok(Range {
            start: self.position(start)?,
            end: self.position(end)?,
        })
    }

    /// Build a range from two byte offsets.
    pub fn range_at_bytes(&self, start: usize, end: usize) -> Result<Range, LocateError> {
        Ok(Range {
            start: self.position_at_byte(start)?,
            end: self.position_at_byte(end)?,
        })
    }

    /// Character offset at which the given 0-based line starts.
    fn line_start(&self, line_index: usize) -> usize {
        if line_index == 0 {
            0
        } else {
            self.totals[line_index - 1]
        }
    }
}
