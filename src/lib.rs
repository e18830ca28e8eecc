//! modtrace - Module-import graph analyzer for JavaScript/TypeScript
//!
//! This crate resolves raw import specifiers to concrete files on disk and
//! walks the resulting directed graph to answer four questions about a
//! source tree: what a file's dependency tree looks like, how many bytes it
//! pulls in transitively, which entry files import a given package, and what
//! import chains connect an entry file to a target module.

pub mod parser;
pub mod report;
pub mod resolve;
pub mod walker;
