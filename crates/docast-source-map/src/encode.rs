//! Opaque string tokens for ranges

use crate::types::Range;

/// Serialize a range into a stable string token.
///
/// The token is used to correlate a location with external tooling; docast
/// itself never reads it back. Layout:
/// `start.line;start.column;start.offset;end.line;end.column;end.offset`.
///
/// # Example
///
/// ```
/// use docast_source_map::{encode_range, Position, Range};
///
/// let range = Range::new(Position::new(0, 1, 1), Position::new(4, 1, 5));
/// assert_eq!(encode_range(&range), "1;1;0;1;5;4");
/// ```
pub fn encode_range(range: &Range) -> String {
    format!(
        "{};{};{};{};{};{}",
        range.start.line,
        range.start.column,
        range.start.offset,
        range.end.line,
        range.end.column,
        range.end.offset
    )
}
