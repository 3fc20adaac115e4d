//! JSON adapter: converts jsonc-parser's AST into docast nodes.
//!
//! jsonc-parser runs in strict mode (no comments, trailing commas or bare
//! property names) and reports byte ranges; the [`Locator`] turns those into
//! character offsets with line/column. A leading byte order mark is skipped
//! but still counted in every offset.

use crate::ast::{
    ArrayNode, AstNode, IdentifierNode, LiteralNode, ObjectNode, PropertyNode, RootNode, Scalar,
    ValueNode,
};
use crate::error::{Error, Result};
use crate::parse::Format;
use docast_source_map::{Locator, Range};
use jsonc_parser::ast::{Array, Object, ObjectProp, ObjectPropName, Value};
use jsonc_parser::common::Range as NativeRange;
use jsonc_parser::{CollectOptions, ParseOptions, parse_to_ast};

/// Parse a JSON document into an AST tree.
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the text is not valid JSON and
/// [`Error::EmptyDocument`] if it holds no value.
pub fn parse(document_index: usize, text: &str) -> Result<RootNode> {
    let options = ParseOptions {
        allow_comments: false,
        allow_loose_object_property_names: false,
        allow_trailing_commas: false,
        ..Default::default()
    };

    let body = text.strip_prefix('\u{feff}').unwrap_or(text);
    let parsed = parse_to_ast(body, &CollectOptions::default(), &options).map_err(|err| {
        Error::Syntax {
            format: Format::Json,
            message: err.to_string(),
            location: None,
        }
    })?;

    let value = parsed.value.ok_or(Error::EmptyDocument {
        format: Format::Json,
    })?;

    let builder = JsonBuilder {
        document_index,
        locator: Locator::new(text),
        byte_shift: text.len() - body.len(),
    };
    let root = builder.value(&value)?;
    tracing::trace!(document_index, node_type = %root.node_type(), "built JSON tree");
    Ok(root)
}

struct JsonBuilder<'a> {
    document_index: usize,
    locator: Locator<'a>,

    /// Bytes skipped before the text handed to jsonc-parser
    byte_shift: usize,
}

impl JsonBuilder<'_> {
    fn loc(&self, range: &NativeRange) -> Result<Range> {
        Ok(self
            .locator
            .range_at_bytes(range.start + self.byte_shift, range.end + self.byte_shift)?)
    }

    fn value(&self, value: &Value<'_>) -> Result<ValueNode> {
        #[allow(unreachable_patterns)]
        let node = match value {
            Value::Object(object) => ValueNode::Object(self.object(object)?),
            Value::Array(array) => ValueNode::Array(self.array(array)?),
            Value::StringLit(lit) => {
                self.literal(&lit.range, Scalar::String(lit.value.to_string()))?
            }
            Value::NumberLit(lit) => {
                let scalar = parse_number(lit.value).ok_or_else(|| Error::InvalidNumber {
                    raw: lit.value.to_string(),
                    location: self
                        .locator
                        .position_at_byte(lit.range.start + self.byte_shift)
                        .ok(),
                })?;
                self.literal(&lit.range, scalar)?
            }
            Value::BooleanLit(lit) => self.literal(&lit.range, Scalar::Bool(lit.value))?,
            Value::NullKeyword(lit) => self.literal(&lit.range, Scalar::Null)?,
            _ => {
                return Err(Error::UnsupportedNode {
                    format: Format::Json,
                    kind: "unknown value".into(),
                    location: None,
                });
            }
        };
        Ok(node)
    }

    fn object(&self, object: &Object<'_>) -> Result<ObjectNode> {
        let children = object
            .properties
            .iter()
            .map(|prop| self.property(prop))
            .collect::<Result<Vec<_>>>()?;
        Ok(ObjectNode::new(
            self.document_index,
            self.loc(&object.range)?,
            children,
        ))
    }

    fn property(&self, prop: &ObjectProp<'_>) -> Result<PropertyNode> {
        let key = match &prop.name {
            ObjectPropName::String(name) => {
                IdentifierNode::new(self.document_index, self.loc(&name.range)?, name.value.to_string())
            }
            ObjectPropName::Word(name) => {
                IdentifierNode::new(self.document_index, self.loc(&name.range)?, name.value)
            }
        };
        let value = self.value(&prop.value)?;
        Ok(PropertyNode::new(
            self.document_index,
            self.loc(&prop.range)?,
            key,
            value,
        ))
    }

    fn array(&self, array: &Array<'_>) -> Result<ArrayNode> {
        let children = array
            .elements
            .iter()
            .map(|element| self.value(element))
            .collect::<Result<Vec<_>>>()?;
        Ok(ArrayNode::new(
            self.document_index,
            self.loc(&array.range)?,
            children,
        ))
    }

    fn literal(&self, range: &NativeRange, value: Scalar) -> Result<ValueNode> {
        Ok(ValueNode::Literal(LiteralNode::new(
            self.document_index,
            self.loc(range)?,
            value,
        )))
    }
}

/// Integers that fit `i64` stay integral; everything else becomes `f64`.
fn parse_number(raw: &str) -> Option<Scalar> {
    if let Ok(i) = raw.parse::<i64>() {
        return Some(Scalar::Integer(i));
    }
    raw.parse::<f64>().ok().map(Scalar::Float)
}
