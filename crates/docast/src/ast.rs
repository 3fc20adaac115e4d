//! Format-neutral AST shared by the JSON and YAML adapters.

use docast_source_map::Range;
use serde::Serialize;
use std::fmt;

/// Discriminant naming each node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    Object,
    Array,
    Literal,
    Property,
    Identifier,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Object => "Object",
            NodeType::Array => "Array",
            NodeType::Literal => "Literal",
            NodeType::Property => "Property",
            NodeType::Identifier => "Identifier",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scalar value carried by a [`LiteralNode`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Name of the scalar kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::Integer(_) | Scalar::Float(_) => "number",
            Scalar::String(_) => "string",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::String(s) => write!(f, "{:?}", s),
        }
    }
}

/// Capabilities every node shares.
pub trait AstNode {
    fn node_type(&self) -> NodeType;

    fn loc(&self) -> &Range;

    /// Which parse call produced this node.
    fn document_index(&self) -> usize;
}

/// A mapping: ordered properties in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Object", rename_all = "camelCase")]
pub struct ObjectNode {
    document_index: usize,
    loc: Range,
    children: Vec<PropertyNode>,
}

/// A sequence of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Array", rename_all = "camelCase")]
pub struct ArrayNode {
    document_index: usize,
    loc: Range,
    children: Vec<ValueNode>,
}

/// A scalar value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Literal", rename_all = "camelCase")]
pub struct LiteralNode {
    document_index: usize,
    loc: Range,
    value: Scalar,
}

/// One key/value entry of an [`ObjectNode`].
///
/// The range spans from the start of the key to the end of the value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Property", rename_all = "camelCase")]
pub struct PropertyNode {
    document_index: usize,
    loc: Range,
    key: IdentifierNode,
    value: ValueNode,
}

/// A property name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Identifier", rename_all = "camelCase")]
pub struct IdentifierNode {
    document_index: usize,
    loc: Range,
    value: String,
}

/// A node that can stand in a value position: the document root, a property
/// value, or an array element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValueNode {
    Object(ObjectNode),
    Array(ArrayNode),
    Literal(LiteralNode),
}

/// The result of parsing one document.
pub type RootNode = ValueNode;

impl ObjectNode {
    pub fn new(document_index: usize, loc: Range, children: Vec<PropertyNode>) -> Self {
        Self {
            document_index,
            loc,
            children,
        }
    }

    pub fn children(&self) -> &[PropertyNode] {
        &self.children
    }

    /// First property whose key equals `key`.
    pub fn get(&self, key: &str) -> Option<&PropertyNode> {
        self.children.iter().find(|prop| prop.key.value == key)
    }

    /// Property names in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.children.iter().map(|prop| prop.key.value())
    }
}

impl ArrayNode {
    pub fn new(document_index: usize, loc: Range, children: Vec<ValueNode>) -> Self {
        Self {
            document_index,
            loc,
            children,
        }
    }

    pub fn children(&self) -> &[ValueNode] {
        &self.children
    }
}

impl LiteralNode {
    pub fn new(document_index: usize, loc: Range, value: Scalar) -> Self {
        Self {
            document_index,
            loc,
            value,
        }
    }

    pub fn value(&self) -> &Scalar {
        &self.value
    }
}

impl PropertyNode {
    pub fn new(document_index: usize, loc: Range, key: IdentifierNode, value: ValueNode) -> Self {
        Self {
            document_index,
            loc,
            key,
            value,
        }
    }

    pub fn key(&self) -> &IdentifierNode {
        &self.key
    }

    pub fn value(&self) -> &ValueNode {
        &self.value
    }
}

impl IdentifierNode {
    pub fn new(document_index: usize, loc: Range, value: impl Into<String>) -> Self {
        Self {
            document_index,
            loc,
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

macro_rules! impl_ast_node {
    ($($ty:ident => $kind:ident),* $(,)?) => {
        $(
            impl AstNode for $ty {
                fn node_type(&self) -> NodeType {
                    NodeType::$kind
                }

                fn loc(&self) -> &Range {
                    &self.loc
                }

                fn document_index(&self) -> usize {
                    self.document_index
                }
            }
        )*
    };
}

impl_ast_node! {
    ObjectNode => Object,
    ArrayNode => Array,
    LiteralNode => Literal,
    PropertyNode => Property,
    IdentifierNode => Identifier,
}

impl ValueNode {
    pub fn as_node(&self) -> NodeRef<'_> {
        match self {
            ValueNode::Object(node) => NodeRef::Object(node),
            ValueNode::Array(node) => NodeRef::Array(node),
            ValueNode::Literal(node) => NodeRef::Literal(node),
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self, ValueNode::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ValueNode::Array(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, ValueNode::Literal(_))
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            ValueNode::Object(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self {
            ValueNode::Array(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralNode> {
        match self {
            ValueNode::Literal(node) => Some(node),
            _ => None,
        }
    }
}

impl AstNode for ValueNode {
    fn node_type(&self) -> NodeType {
        self.as_node().node_type()
    }

    fn loc(&self) -> &Range {
        match self {
            ValueNode::Object(node) => node.loc(),
            ValueNode::Array(node) => node.loc(),
            ValueNode::Literal(node) => node.loc(),
        }
    }

    fn document_index(&self) -> usize {
        self.as_node().document_index()
    }
}

/// A borrowed view of any node kind.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Object(&'a ObjectNode),
    Array(&'a ArrayNode),
    Literal(&'a LiteralNode),
    Property(&'a PropertyNode),
    Identifier(&'a IdentifierNode),
}

impl<'a> NodeRef<'a> {
    pub fn is_object(&self) -> bool {
        matches!(self, NodeRef::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, NodeRef::Array(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, NodeRef::Literal(_))
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, NodeRef::Identifier(_))
    }

    pub fn as_object(&self) -> Option<&'a ObjectNode> {
        match *self {
            NodeRef::Object(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&'a ArrayNode> {
        match *self {
            NodeRef::Array(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&'a LiteralNode> {
        match *self {
            NodeRef::Literal(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&'a PropertyNode> {
        match *self {
            NodeRef::Property(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_identifier(&self) -> Option<&'a IdentifierNode> {
        match *self {
            NodeRef::Identifier(node) => Some(node),
            _ => None,
        }
    }

    /// Range with the lifetime of the underlying tree.
    pub fn range(&self) -> &'a Range {
        match *self {
            NodeRef::Object(node) => &node.loc,
            NodeRef::Array(node) => &node.loc,
            NodeRef::Literal(node) => &node.loc,
            NodeRef::Property(node) => &node.loc,
            NodeRef::Identifier(node) => &node.loc,
        }
    }

    /// Whether both views point at the same node in the same tree.
    pub fn same_node(&self, other: &NodeRef<'_>) -> bool {
        fn addr<T>(node: &T) -> *const () {
            node as *const T as *const ()
        }

        let (a, b) = match (self, other) {
            (NodeRef::Object(a), NodeRef::Object(b)) => (addr(*a), addr(*b)),
            (NodeRef::Array(a), NodeRef::Array(b)) => (addr(*a), addr(*b)),
            (NodeRef::Literal(a), NodeRef::Literal(b)) => (addr(*a), addr(*b)),
            (NodeRef::Property(a), NodeRef::Property(b)) => (addr(*a), addr(*b)),
            (NodeRef::Identifier(a), NodeRef::Identifier(b)) => (addr(*a), addr(*b)),
            _ => return false,
        };
        std::ptr::eq(a, b)
    }
}

impl<'a> From<&'a ValueNode> for NodeRef<'a> {
    fn from(node: &'a ValueNode) -> Self {
        node.as_node()
    }
}

impl AstNode for NodeRef<'_> {
    fn node_type(&self) -> NodeType {
        match self {
            NodeRef::Object(_) => NodeType::Object,
            NodeRef::Array(_) => NodeType::Array,
            NodeRef::Literal(_) => NodeType::Literal,
            NodeRef::Property(_) => NodeType::Property,
            NodeRef::Identifier(_) => NodeType::Identifier,
        }
    }

    fn loc(&self) -> &Range {
        self.range()
    }

    fn document_index(&self) -> usize {
        match self {
            NodeRef::Object(node) => node.document_index,
            NodeRef::Array(node) => node.document_index,
            NodeRef::Literal(node) => node.document_index,
            NodeRef::Property(node) => node.document_index,
            NodeRef::Identifier(node) => node.document_index,
        }
    }
}

/// Visit `node` and every descendant in document order, keys before values.
pub fn walk<'a>(node: NodeRef<'a>, visit: &mut impl FnMut(NodeRef<'a>)) {
    visit(node);
    match node {
        NodeRef::Object(object) => {
            for prop in object.children() {
                walk(NodeRef::Property(prop), visit);
            }
        }
        NodeRef::Array(array) => {
            for child in array.children() {
                walk(child.as_node(), visit);
            }
        }
        NodeRef::Property(prop) => {
            walk(NodeRef::Identifier(prop.key()), visit);
            walk(prop.value().as_node(), visit);
        }
        NodeRef::Literal(_) | NodeRef::Identifier(_) => {}
    }
}
