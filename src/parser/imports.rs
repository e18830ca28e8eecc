//! Import extraction using tree-sitter for JavaScript/TypeScript.
//!
//! Parses source files and returns their import specifiers in source order.
//! Duplicate specifiers are preserved; deduplication of resolved targets is
//! the walker's responsibility, scoped per traversal mode.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::{Language, Parser, Tree};
use walkdir::WalkDir;

/// Errors that can occur during import extraction.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse file: {path}")]
    ParseError { path: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Tree-sitter language initialization failed")]
    LanguageInit,
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// The kind of import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// ES6 import statement: `import ... from 'module'`
    ES6,
    /// CommonJS require: `const x = require('module')`
    CommonJS,
    /// Dynamic import: `import('module')`
    DynamicImport,
}

/// A single import statement found in a source file.
///
/// Only the module specifier matters for graph traversal; the imported
/// bindings are not tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The raw module specifier (e.g., "react", "./utils", "@app/button")
    pub specifier: String,
    /// The kind of import
    pub kind: ImportKind,
    /// Line number in the source file (1-indexed)
    pub line: usize,
}

/// Language type for file analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceLanguage {
    JavaScript,
    TypeScript,
    Tsx,
    Jsx,
}

impl SourceLanguage {
    /// Determine language from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "mjs" | "cjs" => Some(SourceLanguage::JavaScript),
            "jsx" => Some(SourceLanguage::Jsx),
            "ts" | "mts" | "cts" => Some(SourceLanguage::TypeScript),
            "tsx" => Some(SourceLanguage::Tsx),
            _ => None,
        }
    }

    /// Get tree-sitter language for this source language.
    #[allow(dead_code)]
    pub fn tree_sitter_language(&self) -> Language {
        match self {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => {
                tree_sitter_javascript::LANGUAGE.into()
            }
            SourceLanguage::TypeScript | SourceLanguage::Tsx => {
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
            }
        }
    }
}

/// Analyzer for extracting import specifiers from JavaScript/TypeScript files.
pub struct ImportAnalyzer {
    js_parser: Parser,
    ts_parser: Parser,
}

impl ImportAnalyzer {
    /// Create a new ImportAnalyzer.
    pub fn new() -> AnalysisResult<Self> {
        let mut js_parser = Parser::new();
        js_parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|_| AnalysisError::LanguageInit)?;

        let mut ts_parser = Parser::new();
        ts_parser
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|_| AnalysisError::LanguageInit)?;

        Ok(Self {
            js_parser,
            ts_parser,
        })
    }

    /// Analyze a single file and extract all imports in source order.
    pub fn analyze_file(&mut self, path: &Path) -> AnalysisResult<Vec<Import>> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let language = SourceLanguage::from_extension(ext)
            .ok_or_else(|| AnalysisError::UnsupportedFileType(ext.to_string()))?;

        let content = fs::read_to_string(path)?;
        self.analyze_source(&content, language, path)
    }

    /// Analyze source code directly.
    pub fn analyze_source(
        &mut self,
        source: &str,
        language: SourceLanguage,
        path: &Path,
    ) -> AnalysisResult<Vec<Import>> {
        let parser = match language {
            SourceLanguage::JavaScript | SourceLanguage::Jsx => &mut self.js_parser,
            SourceLanguage::TypeScript | SourceLanguage::Tsx => &mut self.ts_parser,
        };

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::ParseError {
                path: path.display().to_string(),
            })?;

        Ok(extract_imports(&tree, source))
    }
}

/// Extract imports from a parsed tree.
fn extract_imports(tree: &Tree, source: &str) -> Vec<Import> {
    let mut imports = Vec::new();
    let mut cursor = tree.root_node().walk();

    visit_node(&mut cursor, source, &mut imports);

    imports
}

/// Recursively visit nodes to find import statements and call expressions.
fn visit_node(cursor: &mut tree_sitter::TreeCursor, source: &str, imports: &mut Vec<Import>) {
    let node = cursor.node();

    match node.kind() {
        "import_statement" => {
            if let Some(import) = parse_es6_import(&node, source) {
                imports.push(import);
            }
        }
        "call_expression" => {
            // Check for require() or dynamic import()
            if let Some(import) = parse_require_or_dynamic_import(&node, source) {
                imports.push(import);
            }
        }
        _ => {}
    }

    if cursor.goto_first_child() {
        loop {
            visit_node(cursor, source, imports);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
        cursor.goto_parent();
    }
}

/// Parse an ES6 import statement; the specifier is the string after `from`
/// (or the lone string in a side-effect import).
fn parse_es6_import(node: &tree_sitter::Node, source: &str) -> Option<Import> {
    let line = node.start_position().row + 1;
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        if child.kind() == "string" {
            let specifier = extract_string_value(&child, source)?;
            return Some(Import {
                specifier,
                kind: ImportKind::ES6,
                line,
            });
        }
    }

    None
}

/// Parse `require('...')` or `import('...')` calls.
fn parse_require_or_dynamic_import(node: &tree_sitter::Node, source: &str) -> Option<Import> {
    let line = node.start_position().row + 1;

    let func_node = node.child_by_field_name("function")?;
    let kind = match node_text(&func_node, source)? {
        "require" => ImportKind::CommonJS,
        "import" => ImportKind::DynamicImport,
        _ => return None,
    };

    let args_node = node.child_by_field_name("arguments")?;
    let mut args_cursor = args_node.walk();

    for child in args_node.children(&mut args_cursor) {
        if child.kind() == "string" {
            let specifier = extract_string_value(&child, source)?;
            return Some(Import {
                specifier,
                kind,
                line,
            });
        }
    }

    None
}

/// Extract the text content of a node.
fn node_text<'a>(node: &tree_sitter::Node, source: &'a str) -> Option<&'a str> {
    source.get(node.start_byte()..node.end_byte())
}

/// Extract string value (removes quotes).
fn extract_string_value(node: &tree_sitter::Node, source: &str) -> Option<String> {
    let text = node_text(node, source)?;
    let trimmed = text
        .trim_start_matches(['"', '\'', '`'])
        .trim_end_matches(['"', '\'', '`']);
    Some(trimmed.to_string())
}

/// Collect all JavaScript/TypeScript files under a directory.
///
/// Skips common build-output and vendor directories. The result is sorted
/// so that entry order is deterministic across runs and filesystems.
pub fn collect_source_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .and_then(SourceLanguage::from_extension)
                .is_some()
        })
        .collect();

    files.sort();
    files
}

/// Check if a directory should be ignored during traversal.
fn is_ignored_dir(entry: &walkdir::DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    matches!(
        name.as_ref(),
        "node_modules" | ".git" | "dist" | "build" | ".next" | "coverage" | ".turbo"
    )
}
