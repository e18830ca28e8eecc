//! Parsing collaborator for modtrace.
//!
//! This module turns JavaScript/TypeScript source text into an ordered list
//! of raw import specifier strings using tree-sitter. It is the only place
//! that knows about syntax; the traversal engine consumes the extracted
//! specifiers without ever touching source text.
//!
//! # Supported import forms
//!
//! - ES6 imports: `import ... from 'module'`
//! - CommonJS: `require('module')`
//! - Dynamic imports: `import('module')`
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use modtrace::parser::ImportAnalyzer;
//!
//! let mut analyzer = ImportAnalyzer::new()?;
//! let imports = analyzer.analyze_file(Path::new("src/index.ts"))?;
//!
//! for import in imports {
//!     println!("{} (line {})", import.specifier, import.line);
//! }
//! ```

pub mod imports;

pub use imports::{
    collect_source_files, AnalysisError, AnalysisResult, Import, ImportAnalyzer, ImportKind,
    SourceLanguage,
};
