//! Language Server Protocol (LSP) implementation for DESC
//!
//!     This crate puts the desc-analysis engine behind a language server so that any
//!     LSP-compatible editor (VSCode, Neovim, Emacs, Helix, ...) gets completion and hover
//!     for DESC world files.
//!
//! Feature Set
//!
//!     DESC files are edited mostly by hand, a block at a time, so the server focuses on
//!     the two requests that help while typing:
//!
//!         1. Completion (textDocument/completion):
//!             - Block keywords on an empty line
//!             - Enumerated values (rarity, type) or literal placeholders after `key:`
//!             - Property names of the enclosing block, inserted as `name: `
//!
//!         2. Hover (textDocument/hover):
//!             - Block keywords
//!             - Property name, description and type for `name: value` lines
//!
//!     Both can be switched off in the configuration, and completion trigger characters
//!     are configurable (default `:`).
//!
//! Architecture
//!
//!     LSP Layer (tower-lsp):
//!         - JSON-RPC transport, capability negotiation, request routing
//!
//!     Server Layer (this crate):
//!         - Implements the LanguageServer trait
//!         - Keeps the latest full text of every open document
//!         - Converts between protocol positions (UTF-16) and engine positions (chars)
//!         - Thin tests asserting the feature layer is called and its results returned
//!
//!     Feature Layer (desc-analysis):
//!         - Stateless functions over a line-indexed document
//!         - All logic and dense unit tests
//!
//!     There is nothing to parse on open or change: every request rescans the stored
//!     lines from the cursor upward.
//!
//! Usage
//!
//!     $ desc-lsp [--config desc.toml] [--log-level debug]
//!     Starts the language server on stdin/stdout. Logs go to stderr.
//!

pub mod server;

pub use server::DescLanguageServer;
