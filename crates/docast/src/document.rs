//! Typed overlay for navigating a parsed tree.
//!
//! Schema types wrap a [`DocumentCursor`] and implement [`DocumentNode`]; the
//! trait's provided methods pull typed children, arrays and literals out of
//! the generic tree while every value keeps its source range.
//!
//! ## Example
//!
//! ```rust
//! use docast::{DocumentCursor, DocumentNode, LiteralNode};
//!
//! struct Service<'a>(DocumentCursor<'a>);
//!
//! impl<'a> DocumentNode<'a> for Service<'a> {
//!     const NODE_TYPE: &'static str = "Service";
//!
//!     fn from_cursor(cursor: DocumentCursor<'a>) -> Self {
//!         Service(cursor)
//!     }
//!
//!     fn cursor(&self) -> &DocumentCursor<'a> {
//!         &self.0
//!     }
//! }
//!
//! impl<'a> Service<'a> {
//!     fn name(&self) -> Option<LiteralNode<'a, String>> {
//!         self.get_literal("name")
//!     }
//! }
//!
//! let root = docast::parse(0, "name: billing\nport: 8080").unwrap();
//! let service = Service::from_root(&root);
//! assert_eq!(service.name().unwrap().value().unwrap(), "billing");
//! assert_eq!(service.key_range("port").as_deref(), Some("2;1;14;2;5;18"));
//! ```

use crate::ast::{AstNode, IdentifierNode, NodeRef, PropertyNode, RootNode, Scalar};
use crate::error::{Error, Result};
use docast_source_map::{Range, encode_range};
use std::marker::PhantomData;

/// Where a new overlay sits in a navigation chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeContext<'a> {
    /// Node the chain started from; `None` makes the new overlay its own root
    pub root: Option<NodeRef<'a>>,

    /// Key of the property whose value is being wrapped
    pub parent_key: Option<&'a IdentifierNode>,
}

/// Untyped overlay: a node plus its navigation context.
#[derive(Debug, Clone, Copy)]
pub struct DocumentCursor<'a> {
    node: NodeRef<'a>,
    root: NodeRef<'a>,
    parent_key: Option<&'a IdentifierNode>,
}

impl<'a> DocumentCursor<'a> {
    pub fn new(node: NodeRef<'a>, context: NodeContext<'a>) -> Self {
        Self {
            node,
            root: context.root.unwrap_or(node),
            parent_key: context.parent_key,
        }
    }

    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    pub fn root_node(&self) -> NodeRef<'a> {
        self.root
    }

    pub fn parent_key(&self) -> Option<&'a IdentifierNode> {
        self.parent_key
    }
}

/// Navigation over a tree for schema-specific wrapper types.
///
/// Implementors provide construction from and access to a
/// [`DocumentCursor`]; everything else is provided. Accessors build a fresh
/// wrapper on every call.
pub trait DocumentNode<'a>: Sized {
    /// Name of the schema type, for diagnostics.
    const NODE_TYPE: &'static str;

    fn from_cursor(cursor: DocumentCursor<'a>) -> Self;

    fn cursor(&self) -> &DocumentCursor<'a>;

    fn new(node: NodeRef<'a>, context: NodeContext<'a>) -> Self {
        Self::from_cursor(DocumentCursor::new(node, context))
    }

    /// Wrap a parsed document's root; the result is its own navigation root.
    fn from_root(root: &'a RootNode) -> Self {
        Self::new(root.as_node(), NodeContext::default())
    }

    fn node(&self) -> NodeRef<'a> {
        self.cursor().node
    }

    fn loc(&self) -> &'a Range {
        self.cursor().node.range()
    }

    /// The node this navigation chain started from.
    fn root(&self) -> DocumentCursor<'a> {
        let root = self.cursor().root;
        DocumentCursor::new(
            root,
            NodeContext {
                root: Some(root),
                parent_key: None,
            },
        )
    }

    /// The chain's root wrapped as a schema type.
    fn root_as<T: DocumentNode<'a>>(&self) -> T {
        T::from_cursor(self.root())
    }

    /// Key of the property that produced this node; `None` for array
    /// elements and roots.
    fn parent_key(&self) -> Option<&'a IdentifierNode> {
        self.cursor().parent_key
    }

    /// Property names in document order, or nothing if this is not an object.
    fn keys(&self) -> Vec<&'a str> {
        self.node()
            .as_object()
            .map(|object| object.keys().collect())
            .unwrap_or_default()
    }

    /// First property named `key`.
    fn get_property(&self, key: &str) -> Option<&'a PropertyNode> {
        self.node().as_object()?.get(key)
    }

    /// Wrap the value of property `key`.
    fn get_child<T: DocumentNode<'a>>(&self, key: &str) -> Option<T> {
        let prop = self.get_property(key)?;
        Some(T::new(
            prop.value().as_node(),
            NodeContext {
                root: Some(self.cursor().root),
                parent_key: Some(prop.key()),
            },
        ))
    }

    /// Wrap each element of the array at property `key`.
    ///
    /// `None` when the property is missing or its value is not an array, so
    /// an empty array stays distinguishable from a mismatch.
    fn get_array<T: DocumentNode<'a>>(&self, key: &str) -> Option<Vec<T>> {
        let array = self.get_property(key)?.value().as_array()?;
        let root = self.cursor().root;
        Some(
            array
                .children()
                .iter()
                .map(|element| {
                    T::new(
                        element.as_node(),
                        NodeContext {
                            root: Some(root),
                            parent_key: None,
                        },
                    )
                })
                .collect(),
        )
    }

    fn get_literal<T: LiteralValue>(&self, key: &str) -> Option<LiteralNode<'a, T>> {
        self.get_child(key)
    }

    /// Encoded range of the key of property `key`.
    fn key_range(&self, key: &str) -> Option<String> {
        self.get_property(key)
            .map(|prop| encode_range(prop.key().loc()))
    }

    /// Encoded range of the whole property `key` (key and value).
    fn prop_range(&self, key: &str) -> Option<String> {
        self.get_property(key).map(|prop| encode_range(prop.loc()))
    }
}

impl<'a> DocumentNode<'a> for DocumentCursor<'a> {
    const NODE_TYPE: &'static str = "Node";

    fn from_cursor(cursor: DocumentCursor<'a>) -> Self {
        cursor
    }

    fn cursor(&self) -> &DocumentCursor<'a> {
        self
    }
}

/// Scalar types a [`LiteralNode`] can produce.
pub trait LiteralValue: Sized {
    /// Kind name reported when a scalar does not fit.
    const EXPECTED: &'static str;

    fn from_scalar(scalar: &Scalar) -> Option<Self>;
}

impl LiteralValue for String {
    const EXPECTED: &'static str = "string";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_str().map(str::to_string)
    }
}

impl LiteralValue for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_bool()
    }
}

impl LiteralValue for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_i64()
    }
}

impl LiteralValue for f64 {
    const EXPECTED: &'static str = "number";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        scalar.as_f64()
    }
}

impl LiteralValue for Scalar {
    const EXPECTED: &'static str = "scalar";

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        Some(scalar.clone())
    }
}

/// Null reads as `None`.
impl<T: LiteralValue> LiteralValue for Option<T> {
    const EXPECTED: &'static str = T::EXPECTED;

    fn from_scalar(scalar: &Scalar) -> Option<Self> {
        if scalar.is_null() {
            Some(None)
        } else {
            T::from_scalar(scalar).map(Some)
        }
    }
}

/// Overlay over a Literal or Identifier node yielding a typed value.
#[derive(Debug, Clone)]
pub struct LiteralNode<'a, T> {
    cursor: DocumentCursor<'a>,
    _value: PhantomData<fn() -> T>,
}

impl<'a, T: LiteralValue> DocumentNode<'a> for LiteralNode<'a, T> {
    const NODE_TYPE: &'static str = "Literal";

    fn from_cursor(cursor: DocumentCursor<'a>) -> Self {
        Self {
            cursor,
            _value: PhantomData,
        }
    }

    fn cursor(&self) -> &DocumentCursor<'a> {
        &self.cursor
    }
}

impl<T: LiteralValue> LiteralNode<'_, T> {
    /// Read the scalar as `T`.
    ///
    /// # Errors
    ///
    /// [`Error::NotALiteral`] if the node is an object, array or property;
    /// [`Error::LiteralTypeMismatch`] if the scalar is of another kind.
    pub fn value(&self) -> Result<T> {
        match self.cursor.node {
            NodeRef::Literal(literal) => Self::convert(literal.value()),
            NodeRef::Identifier(identifier) => {
                Self::convert(&Scalar::String(identifier.value().to_string()))
            }
            other => Err(Error::NotALiteral {
                found: other.node_type(),
            }),
        }
    }

    fn convert(scalar: &Scalar) -> Result<T> {
        T::from_scalar(scalar).ok_or(Error::LiteralTypeMismatch {
            expected: T::EXPECTED,
            found: scalar.kind(),
        })
    }
}
