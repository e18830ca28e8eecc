//! Module resolution for modtrace.
//!
//! This module maps raw import specifiers to concrete files on disk. It
//! handles relative paths, extensionless imports, directory-index imports,
//! and tsconfig path aliases.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use modtrace::resolve::{resolve, AliasTable};
//!
//! let aliases = AliasTable::load(Path::new("."));
//! let target = resolve("./utils", Path::new("src/index.ts"), aliases.as_ref());
//! ```

mod alias;
mod path;

pub use alias::{AliasRule, AliasTable};
pub use path::{is_external_specifier, resolve, EXTENSION_PROBE_ORDER};
