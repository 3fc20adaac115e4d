//! Source locations for docast
//!
//! This crate provides the location types shared by every docast node and
//! the [`Locator`] that turns absolute offsets into 1-based line/column
//! pairs.
//!
//! # Overview
//!
//! The core types are:
//! - [`Position`]: a point (character offset, line, column)
//! - [`Range`]: a start/end pair of positions
//! - [`Locator`]: resolves offsets against one document's text
//! - [`encode_range`]: serializes a range into an opaque token
//!
//! # Example
//!
//! ```rust
//! use docast_source_map::*;
//!
//! let locator = Locator::new("title: Hello\nauthor: World");
//! let range = locator.range(13, 19).unwrap();
//!
//! assert_eq!(range.start.line, 2);
//! assert_eq!(range.start.column, 1);
//! assert_eq!(encode_range(&range), "2;1;13;2;7;19");
//! ```

pub mod encode;
pub mod locator;
pub mod types;

pub use encode::encode_range;
pub use locator::{LocateError, Locator};
pub use types::{Position, Range};
