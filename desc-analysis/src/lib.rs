//! Authoring assistance for the DESC game-world format.
//!
//!     DESC files describe locations, items, characters and the like as nested
//!     brace-delimited blocks holding `key: value` properties:
//!
//!         LOCATION forest {
//!             name: "Dark forest"
//!             RESOURCES {
//!                 RESOURCE herb {
//!                     rarity: COMMON
//!                 }
//!             }
//!         }
//!
//!     This crate answers editor queries against such documents without building
//!     an AST. Every query looks at the raw lines around the cursor:
//!
//!         - [`context`] scans backward from the cursor over balanced braces to find
//!           the innermost block that is still open.
//!         - [`completion`] classifies the text before the cursor and offers block
//!           keywords, property names, enumerated values or literal placeholders.
//!         - [`hover`] documents block keywords and the properties of the enclosing
//!           block.
//!
//!     All of them read the static tables in [`schema`]. Nothing here keeps state
//!     between calls, so the same document and position always produce the same
//!     answer. Malformed input degrades to empty results, never to errors.

pub mod completion;
pub mod context;
pub mod document;
pub mod hover;
pub mod schema;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use completion::{completion_items, Suggestion, SuggestionKind};
pub use context::{resolve, ResolvedContext};
pub use document::{DocumentView, LineIndex, Position, Range};
pub use hover::{hover, HoverResult};
pub use schema::{schema, BlockKeyword, PropertyDescriptor, PropertyType, Schema, SchemaError};
