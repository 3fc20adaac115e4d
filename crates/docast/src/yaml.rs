//! YAML adapter: builds AST trees from yaml-rust2 parser events.
//!
//! yaml-rust2 reports a start marker per event but no end positions, so node
//! ends are derived from the source text and every offset is resolved to a
//! line/column through a [`Locator`] built over the whole document.
//!
//! Markers are read through their line and column. Their `index` drifts by the
//! byte length of non-ASCII block scalar lines, while the column resets on
//! every line break.

use crate::ast::{
    ArrayNode, AstNode, IdentifierNode, LiteralNode, ObjectNode, PropertyNode, RootNode, Scalar,
    ValueNode,
};
use crate::error::{Error, Result};
use crate::parse::Format;
use docast_source_map::{Locator, Range};
use once_cell::sync::Lazy;
use regex::Regex;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

static INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-+]?[0-9]+$").unwrap());

static FLOAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$").unwrap());

/// `|` or `>` with optional indentation/chomping indicators, up to the end of
/// the line
static BLOCK_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[|>]([1-9][+-]?|[+-][1-9]?)?[ \t]*(#.*)?$").unwrap());

/// Parse the first YAML document in `text` into an AST tree.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if yaml-rust2 rejects the text,
/// [`Error::EmptyDocument`] if the stream holds no document, and
/// [`Error::UnsupportedNode`] for aliases and non-scalar mapping keys.
pub fn parse(document_index: usize, text: &str) -> Result<RootNode> {
    let mut parser = Parser::new_from_str(text);
    let mut builder = YamlBuilder::new(document_index, text);

    if let Err(err) = parser.load(&mut builder, false) {
        let offset = builder.marker_offset(err.marker());
        return Err(Error::Syntax {
            format: Format::Yaml,
            message: err.info().to_string(),
            location: builder.locator.position(offset).ok(),
        });
    }

    let root = builder.finish()?;
    tracing::trace!(document_index, node_type = %root.node_type(), "built YAML tree");
    Ok(root)
}

/// Receives marked events and assembles the tree bottom-up.
struct YamlBuilder<'a> {
    document_index: usize,

    locator: Locator<'a>,

    /// Source characters, indexed by marker position
    chars: Vec<char>,

    /// Collections still being filled
    stack: Vec<BuildNode>,

    root: Option<ValueNode>,

    /// First construction failure; later events are ignored
    error: Option<Error>,
}

enum BuildNode {
    Sequence {
        start: usize,
        items: Vec<ValueNode>,
    },

    Mapping {
        start: usize,
        entries: Vec<PropertyNode>,
        /// Key read but value not yet complete
        pending_key: Option<IdentifierNode>,
    },
}

impl<'a> YamlBuilder<'a> {
    fn new(document_index: usize, text: &'a str) -> Self {
        Self {
            document_index,
            locator: Locator::new(text),
            chars: text.chars().collect(),
            stack: Vec::new(),
            root: None,
            error: None,
        }
    }

    fn finish(self) -> Result<RootNode> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.root.ok_or(Error::EmptyDocument {
            format: Format::Yaml,
        })
    }

    fn handle_event(&mut self, ev: Event, marker: Marker) -> Result<()> {
        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => Ok(()),

            Event::Scalar(value, style, _anchor_id, tag) => {
                let is_plain = matches!(style, TScalarStyle::Plain);
                let is_block = matches!(style, TScalarStyle::Literal | TScalarStyle::Folded);
                let marker_offset = self.marker_offset(&marker);
                let (start, end) = if is_block {
                    self.block_scalar_range(marker_offset, &value)
                } else {
                    (marker_offset, self.scalar_end(marker_offset, style, &value))
                };

                if self.awaiting_key() {
                    let loc = self.locator.range(start, end)?;
                    let key = IdentifierNode::new(self.document_index, loc, value);
                    if let Some(BuildNode::Mapping { pending_key, .. }) = self.stack.last_mut() {
                        *pending_key = Some(key);
                    }
                    return Ok(());
                }

                let forced_string = tag.as_ref().is_some_and(|tag| tag.suffix == "str");

                // An empty value (`key:` or `-`) arrives as a synthetic `~`
                // marked at the next token; anchor it right after its key or
                // its dash instead
                let synthetic_empty = is_plain
                    && (value.is_empty() || (value == "~" && self.chars.get(start) != Some(&'~')));
                let (start, end) = match self.empty_value_anchor() {
                    Some(anchor) if synthetic_empty => (anchor, anchor),
                    _ => (start, end),
                };

                let scalar = if is_plain && !forced_string {
                    resolve_plain_scalar(&value)
                } else {
                    Scalar::String(value)
                };

                let loc = self.locator.range(start, end)?;
                self.push_complete(ValueNode::Literal(LiteralNode::new(
                    self.document_index,
                    loc,
                    scalar,
                )))
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                self.reject_complex_key(&marker, "sequence")?;
                self.stack.push(BuildNode::Sequence {
                    start: self.marker_offset(&marker),
                    items: Vec::new(),
                });
                Ok(())
            }

            Event::SequenceEnd => match self.stack.pop() {
                Some(BuildNode::Sequence { start, items }) => {
                    let last_end = items.last().map(|item| item.loc().end.offset);
                    let end = self.collection_end(start, &marker, ']', last_end);
                    let loc = self.locator.range(start, end)?;
                    self.push_complete(ValueNode::Array(ArrayNode::new(
                        self.document_index,
                        loc,
                        items,
                    )))
                }
                _ => Err(self.unsupported(&marker, "unbalanced sequence end")),
            },

            Event::MappingStart(_anchor_id, _tag) => {
                self.reject_complex_key(&marker, "mapping")?;
                self.stack.push(BuildNode::Mapping {
                    start: self.marker_offset(&marker),
                    entries: Vec::new(),
                    pending_key: None,
                });
                Ok(())
            }

            Event::MappingEnd => match self.stack.pop() {
                Some(BuildNode::Mapping { start, entries, .. }) => {
                    // Block mappings are marked at the first `:`
                    let start = match entries.first() {
                        Some(first) if self.chars.get(start) != Some(&'{') => {
                            first.loc().start.offset.min(start)
                        }
                        _ => start,
                    };
                    let last_end = entries.last().map(|entry| entry.loc().end.offset);
                    let end = self.collection_end(start, &marker, '}', last_end);
                    let loc = self.locator.range(start, end)?;
                    self.push_complete(ValueNode::Object(ObjectNode::new(
                        self.document_index,
                        loc,
                        entries,
                    )))
                }
                _ => Err(self.unsupported(&marker, "unbalanced mapping end")),
            },

            Event::Alias(_anchor_id) => Err(self.unsupported(&marker, "alias")),
        }
    }

    /// Attach a finished value to its parent collection, or make it the root.
    fn push_complete(&mut self, node: ValueNode) -> Result<()> {
        let document_index = self.document_index;
        match self.stack.last_mut() {
            None => {
                // Only the first document is kept
                if self.root.is_none() {
                    self.root = Some(node);
                }
                Ok(())
            }
            Some(BuildNode::Sequence { items, .. }) => {
                items.push(node);
                Ok(())
            }
            Some(BuildNode::Mapping {
                entries,
                pending_key,
                ..
            }) => {
                let key = pending_key.take().ok_or_else(|| Error::UnsupportedNode {
                    format: Format::Yaml,
                    kind: "mapping value without key".into(),
                    location: Some(node.loc().start),
                })?;
                let loc = Range::new(key.loc().start, node.loc().end);
                entries.push(PropertyNode::new(document_index, loc, key, node));
                Ok(())
            }
        }
    }

    /// Whether the next completed node is a mapping key.
    fn awaiting_key(&self) -> bool {
        matches!(
            self.stack.last(),
            Some(BuildNode::Mapping {
                pending_key: None,
                ..
            })
        )
    }

    /// Where a synthetic empty value belongs: after the pending key, or after
    /// the dash of the next block sequence entry.
    fn empty_value_anchor(&self) -> Option<usize> {
        match self.stack.last() {
            Some(BuildNode::Mapping {
                pending_key: Some(key),
                ..
            }) => Some(key.loc().end.offset),
            Some(BuildNode::Sequence { start, items }) if self.chars.get(*start) == Some(&'-') => {
                let from = items.last().map_or(*start, |item| item.loc().end.offset);
                self.next_entry_dash(from).map(|dash| dash + 1)
            }
            _ => None,
        }
    }

    /// First `-` entry indicator at or after `from`, skipping comments.
    fn next_entry_dash(&self, from: usize) -> Option<usize> {
        let mut i = from;
        while i < self.chars.len() {
            match self.chars[i] {
                '#' => i = self.line_end(i),
                '-' if self.chars.get(i + 1).is_none_or(|c| c.is_whitespace()) => {
                    return Some(i);
                }
                _ => i += 1,
            }
        }
        None
    }

    fn reject_complex_key(&self, marker: &Marker, kind: &str) -> Result<()> {
        if self.awaiting_key() {
            return Err(self.unsupported(marker, &format!("{} used as mapping key", kind)));
        }
        Ok(())
    }

    fn unsupported(&self, marker: &Marker, kind: &str) -> Error {
        Error::UnsupportedNode {
            format: Format::Yaml,
            kind: kind.to_string(),
            location: self.locator.position(self.marker_offset(marker)).ok(),
        }
    }

    /// Character offset of a marker. Markers past the last line (the stream
    /// end after a final break) resolve to the end of the document.
    fn marker_offset(&self, marker: &Marker) -> usize {
        self.locator
            .offset_at(marker.line(), marker.col() + 1)
            .unwrap_or(self.chars.len())
    }

    fn clamp(&self, offset: usize) -> usize {
        offset.min(self.chars.len())
    }

    /// End offset (exclusive) of a scalar starting at `start`.
    fn scalar_end(&self, start: usize, style: TScalarStyle, value: &str) -> usize {
        let end = match style {
            TScalarStyle::SingleQuoted => self.quoted_end(start, '\''),
            TScalarStyle::DoubleQuoted => self.quoted_end(start, '"'),
            _ => self.plain_end(start, value),
        };
        self.clamp(end).max(start)
    }

    /// Walk the source alongside the value. Whitespace runs in the value stand
    /// for any whitespace run in the source, which covers folded lines.
    fn plain_end(&self, start: usize, value: &str) -> usize {
        let mut i = start;
        for ch in value.chars() {
            if ch.is_whitespace() {
                while i < self.chars.len() && self.chars[i].is_whitespace() {
                    i += 1;
                }
            } else if self.chars.get(i) == Some(&ch) {
                i += 1;
            } else {
                break;
            }
        }
        i
    }

    fn quoted_end(&self, start: usize, quote: char) -> usize {
        let mut i = start + 1;
        while i < self.chars.len() {
            match self.chars[i] {
                '\\' if quote == '"' => i += 2,
                c if c == quote => {
                    if quote == '\'' && self.chars.get(i + 1) == Some(&'\'') {
                        i += 2;
                    } else {
                        return i + 1;
                    }
                }
                _ => i += 1,
            }
        }
        self.chars.len()
    }

    /// Range of a literal or folded block scalar.
    ///
    /// yaml-rust2 marks these at their first content character. The range
    /// starts at the `|`/`>` indicator and ends with the last content line,
    /// i.e. the last non-blank line indented at least as deep as the first.
    fn block_scalar_range(&self, marker: usize, value: &str) -> (usize, usize) {
        if let Some(indicator) = self.header_at(marker) {
            // No content: the marker already sits on the indicator
            return (indicator, self.header_end(indicator));
        }

        let line_start = self.line_start(marker);
        let indicator = self.preceding_header(line_start);
        let start = indicator.unwrap_or(marker);
        if value.trim().is_empty() {
            let end = indicator.map_or(marker, |indicator| self.header_end(indicator));
            return (start, end);
        }

        let indent = marker - line_start;
        let mut end = self.line_end(marker);
        let mut cursor = end;
        while cursor < self.chars.len() {
            let next_start = cursor + 1;
            let next_end = self.line_end(next_start);
            let content = self.skip_spaces(next_start);
            let blank = self.chars[content..next_end].iter().all(|c| c.is_whitespace());
            if !blank {
                if content - next_start < indent || (indent == 0 && self.is_document_marker(next_start)) {
                    break;
                }
                end = next_end;
            }
            cursor = next_end;
        }
        (start, end)
    }

    /// The indicator of the closest non-blank line before `line_start`, if
    /// that line ends in a block scalar header.
    fn preceding_header(&self, line_start: usize) -> Option<usize> {
        let mut end = line_start.checked_sub(1)?;
        loop {
            let start = self.line_start(end);
            if !self.chars[start..end].iter().all(|c| c.is_whitespace()) {
                return (start..end).find(|&i| self.header_at(i).is_some());
            }
            end = start.checked_sub(1)?;
        }
    }

    /// `pos` if it opens a block scalar header running to the end of its line.
    fn header_at(&self, pos: usize) -> Option<usize> {
        if !matches!(self.chars.get(pos), Some('|' | '>')) {
            return None;
        }
        let rest: String = self.chars[pos..self.line_end(pos)].iter().collect();
        BLOCK_HEADER.is_match(&rest).then_some(pos)
    }

    /// End of the indicator token (`|`, `>-`, `|2+`, ...).
    fn header_end(&self, indicator: usize) -> usize {
        let mut end = indicator + 1;
        while end < self.chars.len() && matches!(self.chars[end], '+' | '-' | '1'..='9') {
            end += 1;
        }
        end
    }

    fn is_document_marker(&self, line_start: usize) -> bool {
        let head: String = self.chars[line_start..self.line_end(line_start)]
            .iter()
            .take(3)
            .collect();
        head == "---" || head == "..."
    }

    fn line_start(&self, pos: usize) -> usize {
        self.chars[..pos.min(self.chars.len())]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |idx| idx + 1)
    }

    fn skip_spaces(&self, mut pos: usize) -> usize {
        while pos < self.chars.len() && self.chars[pos] == ' ' {
            pos += 1;
        }
        pos
    }

    fn line_end(&self, pos: usize) -> usize {
        self.chars[pos.min(self.chars.len())..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(self.chars.len(), |idx| pos + idx)
    }

    /// Flow collections end after their closing bracket; block collections
    /// end with their last child, so trailing comments stay outside.
    fn collection_end(
        &self,
        start: usize,
        marker: &Marker,
        close: char,
        last_child_end: Option<usize>,
    ) -> usize {
        let end = self.marker_offset(marker);
        let flow = matches!(self.chars.get(start), Some('[' | '{'));
        if flow && self.chars.get(end) == Some(&close) {
            return end + 1;
        }
        match last_child_end {
            Some(child_end) => child_end.max(start),
            None => {
                let mut end = end.max(start);
                while end > start && self.chars[end - 1].is_whitespace() {
                    end -= 1;
                }
                end
            }
        }
    }
}

impl MarkedEventReceiver for YamlBuilder<'_> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle_event(ev, marker) {
            self.error = Some(err);
        }
    }
}

/// Resolve an untagged plain scalar with the YAML core schema.
fn resolve_plain_scalar(value: &str) -> Scalar {
    match value {
        "" | "~" | "null" | "Null" | "NULL" => return Scalar::Null,
        "true" | "True" | "TRUE" => return Scalar::Bool(true),
        "false" | "False" | "FALSE" => return Scalar::Bool(false),
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => {
            return Scalar::Float(f64::INFINITY);
        }
        "-.inf" | "-.Inf" | "-.INF" => return Scalar::Float(f64::NEG_INFINITY),
        ".nan" | ".NaN" | ".NAN" => return Scalar::Float(f64::NAN),
        _ => {}
    }

    if let Some(i) = parse_integer(value) {
        return Scalar::Integer(i);
    }

    if FLOAT.is_match(value) {
        if let Ok(f) = value.parse::<f64>() {
            return Scalar::Float(f);
        }
    }

    Scalar::String(value.to_string())
}

fn parse_integer(value: &str) -> Option<i64> {
    if let Some(hex) = value.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(octal) = value.strip_prefix("0o") {
        i64::from_str_radix(octal, 8).ok()
    } else if INTEGER.is_match(value) {
        value.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeType;
    use docast_source_map::Position;

    fn root_object(text: &str) -> ObjectNode {
        match parse(0, text).unwrap() {
            ValueNode::Object(object) => object,
            other => panic!("expected object, got {:?}", other.node_type()),
        }
    }

    fn literal(node: &ValueNode) -> &Scalar {
        node.as_literal().unwrap().value()
    }

    #[test]
    fn test_parse_scalar_root() {
        let root = parse(0, "hello").unwrap();
        assert_eq!(root.node_type(), NodeType::Literal);
        assert_eq!(literal(&root), &Scalar::String("hello".into()));
        assert_eq!(root.loc().start, Position::new(0, 1, 1));
        assert_eq!(root.loc().end, Position::new(5, 1, 6));
    }

    #[test]
    fn test_typed_plain_scalars() {
        let object = root_object(
            "int: 42\nneg: -7\nhex: 0x1F\nfloat: 2.5\nexp: 1e3\nyes: true\nno: FALSE\nnothing: ~\ntext: hello world\nversion: 1.2.3",
        );
        let value = |key: &str| literal(object.get(key).unwrap().value()).clone();

        assert_eq!(value("int"), Scalar::Integer(42));
        assert_eq!(value("neg"), Scalar::Integer(-7));
        assert_eq!(value("hex"), Scalar::Integer(31));
        assert_eq!(value("float"), Scalar::Float(2.5));
        assert_eq!(value("exp"), Scalar::Float(1000.0));
        assert_eq!(value("yes"), Scalar::Bool(true));
        assert_eq!(value("no"), Scalar::Bool(false));
        assert_eq!(value("nothing"), Scalar::Null);
        assert_eq!(value("text"), Scalar::String("hello world".into()));
        assert_eq!(value("version"), Scalar::String("1.2.3".into()));
    }

    #[test]
    fn test_quoted_and_tagged_scalars_stay_strings() {
        let object = root_object("a: \"42\"\nb: 'true'\nc: !!str 7");
        assert_eq!(
            literal(object.get("a").unwrap().value()),
            &Scalar::String("42".into())
        );
        assert_eq!(
            literal(object.get("b").unwrap().value()),
            &Scalar::String("true".into())
        );
        assert_eq!(
            literal(object.get("c").unwrap().value()),
            &Scalar::String("7".into())
        );
    }

    #[test]
    fn test_keys_are_raw_identifiers() {
        let object = root_object("1: one\ntrue: yes\nnull: x");
        let keys: Vec<_> = object.keys().collect();
        assert_eq!(keys, vec!["1", "true", "null"]);
        for prop in object.children() {
            assert_eq!(prop.key().node_type(), NodeType::Identifier);
        }
    }

    #[test]
    fn test_property_ranges() {
        let object = root_object("name: test\ncount: 3\n");
        let name = object.get("name").unwrap();
        assert_eq!(name.key().loc().start, Position::new(0, 1, 1));
        assert_eq!(name.key().loc().end, Position::new(4, 1, 5));
        assert_eq!(name.value().loc().start, Position::new(6, 1, 7));
        assert_eq!(name.value().loc().end, Position::new(10, 1, 11));
        assert_eq!(name.loc().start.offset, 0);
        assert_eq!(name.loc().end.offset, 10);

        let count = object.get("count").unwrap();
        assert_eq!(count.key().loc().start, Position::new(11, 2, 1));
        assert_eq!(count.value().loc().start, Position::new(18, 2, 8));
        assert_eq!(count.value().loc().end, Position::new(19, 2, 9));

        // Trailing newline is not part of the mapping
        assert_eq!(object.loc().end.offset, 19);
    }

    #[test]
    fn test_quoted_scalar_range_includes_quotes() {
        let object = root_object("a: \"x\\\"y\"\nb: 'it''s'");
        let a = object.get("a").unwrap().value();
        assert_eq!(literal(a), &Scalar::String("x\"y".into()));
        assert_eq!(a.loc().start.offset, 3);
        assert_eq!(a.loc().end.offset, 9);

        let b = object.get("b").unwrap().value();
        assert_eq!(literal(b), &Scalar::String("it's".into()));
        assert_eq!(b.loc().start, Position::new(13, 2, 4));
        assert_eq!(b.loc().end, Position::new(20, 2, 11));
    }

    #[test]
    fn test_block_scalar_range() {
        let text = "script: |\n  line one\n  line two\nnext: 1\n";
        let object = root_object(text);
        let script = object.get("script").unwrap().value();
        assert_eq!(literal(script), &Scalar::String("line one\nline two\n".into()));
        assert_eq!(script.loc().start, Position::new(8, 1, 9));
        assert_eq!(script.loc().end, Position::new(31, 3, 11));

        let next = object.get("next").unwrap();
        assert_eq!(next.key().loc().start, Position::new(32, 4, 1));
    }

    #[test]
    fn test_block_scalar_in_sequence() {
        let text = "items:\n  - |\n    body\n  - tail\n";
        let object = root_object(text);
        let items = object.get("items").unwrap().value().as_array().unwrap();
        assert_eq!(items.children().len(), 2);
        let body = &items.children()[0];
        assert_eq!(literal(body), &Scalar::String("body\n".into()));
        assert_eq!(body.loc().start, Position::new(11, 2, 5));
        assert_eq!(body.loc().end, Position::new(21, 3, 9));
    }

    #[test]
    fn test_nested_structure() {
        let text = "project:\n  title: My Project\n  authors:\n    - Alice\n    - Bob\n";
        let object = root_object(text);
        let project = object.get("project").unwrap().value().as_object().unwrap();
        assert_eq!(project.keys().collect::<Vec<_>>(), vec!["title", "authors"]);

        let authors = project.get("authors").unwrap().value().as_array().unwrap();
        assert_eq!(authors.children().len(), 2);
        assert_eq!(authors.loc().start, Position::new(44, 4, 5));
        assert_eq!(literal(&authors.children()[1]), &Scalar::String("Bob".into()));
        assert_eq!(authors.children()[1].loc().start, Position::new(58, 5, 7));

        // Block collections stop before the trailing newline
        assert_eq!(authors.loc().end.offset, 61);
        assert_eq!(object.loc().end.offset, 61);
    }

    #[test]
    fn test_block_mapping_starts_at_first_key() {
        let object = root_object("a:\n  b: 1\nc: 2\n");
        assert_eq!(object.loc().start, Position::new(0, 1, 1));
        assert_eq!(object.loc().end, Position::new(14, 3, 5));

        let a = object.get("a").unwrap();
        let inner = a.value().as_object().unwrap();
        assert_eq!(inner.loc().start, Position::new(5, 2, 3));
        assert_eq!(inner.loc().end, Position::new(9, 2, 7));
        assert_eq!(inner.children()[0].loc(), inner.loc());
        assert_eq!(a.loc().end.offset, 9);
    }

    #[test]
    fn test_mapping_in_sequence_starts_at_key() {
        let root = parse(0, "- x: 1\n  y: 2\n").unwrap();
        let item = root.as_array().unwrap().children()[0].as_object().unwrap();
        assert_eq!(item.loc().start, Position::new(2, 1, 3));
        assert_eq!(item.loc().end, Position::new(13, 2, 7));
    }

    #[test]
    fn test_non_ascii_block_scalar_keeps_later_offsets() {
        let text = format!("a: |\n  {}\nb: 1\n", "é".repeat(39));
        let object = root_object(&text);

        let a = object.get("a").unwrap().value();
        assert_eq!(literal(a), &Scalar::String(format!("{}\n", "é".repeat(39))));
        assert_eq!(a.loc().start, Position::new(3, 1, 4));
        assert_eq!(a.loc().end, Position::new(46, 2, 42));

        let b = object.get("b").unwrap();
        assert_eq!(b.key().value(), "b");
        assert_eq!(b.key().loc().start, Position::new(47, 3, 1));
        assert_eq!(b.value().loc().start, Position::new(50, 3, 4));
        assert_eq!(b.value().loc().end, Position::new(51, 3, 5));
        assert_eq!(object.loc().end.offset, 51);
    }

    #[test]
    fn test_block_scalar_header_variants() {
        let text = "keep: |+\n  kept\n\nfold: >-  # note\n  one\n  two\nlast: x\n";
        let object = root_object(text);

        let keep = object.get("keep").unwrap().value();
        assert_eq!(keep.loc().start.offset, 6);
        // Trailing blank lines are not content
        assert_eq!(keep.loc().end, Position::new(15, 2, 7));

        let fold = object.get("fold").unwrap().value();
        assert_eq!(literal(fold), &Scalar::String("one two".into()));
        assert_eq!(fold.loc().start, Position::new(23, 4, 7));
        assert_eq!(fold.loc().end, Position::new(45, 6, 6));
    }

    #[test]
    fn test_trailing_comments_outside_collections() {
        let object = root_object("k: v # c\n");
        assert_eq!(object.loc().end.offset, 4);

        let object = root_object("a:\n  b: 1\n  # trailing comment\nc: 2");
        let inner = object.get("a").unwrap().value();
        assert_eq!(inner.loc().end, Position::new(9, 2, 7));
    }

    #[test]
    fn test_empty_sequence_item_after_dash() {
        let root = parse(0, "- \n- b\n").unwrap();
        let array = root.as_array().unwrap();
        let empty = &array.children()[0];
        assert_eq!(literal(empty), &Scalar::Null);
        assert_eq!(empty.loc().start, Position::new(1, 1, 2));
        assert_eq!(empty.loc().end, Position::new(1, 1, 2));

        let b = &array.children()[1];
        assert_eq!(b.loc().start, Position::new(5, 2, 3));
        assert_eq!(array.loc().end.offset, 6);
    }

    #[test]
    fn test_flow_collections_include_brackets() {
        let object = root_object("list: [1, 2, 3]\nmap: {a: b}");
        let list = object.get("list").unwrap().value();
        assert!(list.is_array());
        assert_eq!(list.loc().start.offset, 6);
        assert_eq!(list.loc().end.offset, 15);

        let map = object.get("map").unwrap().value();
        assert!(map.is_object());
        assert_eq!(map.loc().start, Position::new(21, 2, 6));
        assert_eq!(map.loc().end, Position::new(27, 2, 12));
    }

    #[test]
    fn test_empty_value_is_null_after_key() {
        let object = root_object("a:\nb: 1");
        let a = object.get("a").unwrap();
        assert_eq!(literal(a.value()), &Scalar::Null);
        assert_eq!(a.value().loc().start.offset, 1);
        assert_eq!(a.loc().end.offset, 1);
    }

    #[test]
    fn test_document_index_propagates() {
        let root = parse(7, "a:\n  - b: c").unwrap();
        let mut indices = Vec::new();
        crate::ast::walk(root.as_node(), &mut |node| {
            indices.push(node.document_index())
        });
        assert!(indices.len() > 4);
        assert!(indices.iter().all(|&i| i == 7));
    }

    #[test]
    fn test_only_first_document() {
        let root = parse(0, "a: 1\n---\nb: 2\n").unwrap();
        let object = root.as_object().unwrap();
        assert_eq!(object.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_empty_stream_is_an_error() {
        assert_eq!(
            parse(0, ""),
            Err(Error::EmptyDocument {
                format: Format::Yaml
            })
        );
        assert!(matches!(
            parse(0, "# just a comment\n"),
            Err(Error::EmptyDocument { .. })
        ));
    }

    #[test]
    fn test_alias_is_unsupported() {
        let err = parse(0, "a: &x 1\nb: *x\n").unwrap_err();
        match err {
            Error::UnsupportedNode { kind, location, .. } => {
                assert_eq!(kind, "alias");
                assert_eq!(location.unwrap().line, 2);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_complex_key_is_unsupported() {
        let err = parse(0, "? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, Error::UnsupportedNode { .. }));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse(0, "a: [1, 2\nb: 3").unwrap_err();
        match err {
            Error::Syntax {
                format, location, ..
            } => {
                assert_eq!(format, Format::Yaml);
                assert!(location.is_some());
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_resolve_plain_scalar_edge_cases() {
        assert_eq!(resolve_plain_scalar("inf"), Scalar::String("inf".into()));
        assert_eq!(resolve_plain_scalar(".5"), Scalar::Float(0.5));
        assert_eq!(resolve_plain_scalar("+3"), Scalar::Integer(3));
        assert_eq!(resolve_plain_scalar("0o17"), Scalar::Integer(15));
        assert_eq!(resolve_plain_scalar("0x"), Scalar::String("0x".into()));
        assert_eq!(resolve_plain_scalar("-.inf"), Scalar::Float(f64::NEG_INFINITY));
        assert!(matches!(resolve_plain_scalar(".nan"), Scalar::Float(f) if f.is_nan()));
        assert_eq!(resolve_plain_scalar("yes"), Scalar::String("yes".into()));
    }
}
