//! Dependency graph traversal engine.
//!
//! A [`Walker`] performs mode-specific walks over a source tree's
//! module-import graph: tree enumeration, cumulative size aggregation,
//! import-chain tracing, and direct package-usage search. All four modes
//! share the same edge-resolution primitive but differ in visited-state
//! scoping and aggregation policy:
//!
//! - **enumerate** keeps one visited set for the whole walk, so a repeat
//!   encounter is reported once and never re-expanded
//! - **size** uses a fresh visited set per root, counting each distinct file
//!   once per root with no cross-root dedup
//! - **trace** scopes its visited set to the current path stack and reverts
//!   it on backtrack, so one file may appear in several distinct chains
//! - **search** never expands edges at all
//!
//! The import graph may contain cycles; every mode terminates on them.

mod search;
mod size;
mod source;
mod trace;
mod tree;

pub use size::SizeReport;
pub use source::{SourceCache, SourceUnit};
pub use trace::Chain;
pub use tree::{TreeEvent, TreeOptions};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::parser::AnalysisResult;
use crate::resolve::{self, AliasTable};

/// Recursion ceiling for graph walks. A pathological import chain deeper
/// than this yields a diagnostic instead of exhausting the stack.
pub const MAX_DEPTH: usize = 128;

/// One resolved import edge: the raw specifier, the concrete file it denotes
/// (if any), and its internal/external classification.
///
/// A bare specifier that an alias rule maps onto an existing project file is
/// internal; a bare specifier with no alias match is external. An internal-
/// shaped specifier (`./`, `../`, `/`) that resolves to nothing stays
/// internal with no target, which surfaces as an unresolved-edge warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEdge {
    /// The raw specifier as written in the import statement
    pub specifier: String,
    /// The resolved absolute file path, when resolution succeeded
    pub target: Option<PathBuf>,
    /// Whether the specifier denotes an external package
    pub external: bool,
}

/// The traversal engine. Owns the per-run parse cache and the alias table
/// loaded once at startup. Single-threaded by design.
pub struct Walker {
    cache: SourceCache,
    aliases: Option<AliasTable>,
    sizes: HashMap<PathBuf, u64>,
}

impl Walker {
    /// Creates a walker with an optional alias table.
    ///
    /// Fails only if the tree-sitter grammars cannot be initialized.
    pub fn new(aliases: Option<AliasTable>) -> AnalysisResult<Self> {
        Ok(Self {
            cache: SourceCache::new()?,
            aliases,
            sizes: HashMap::new(),
        })
    }

    /// Resolves one import edge. Shared by all traversal modes.
    pub(crate) fn resolve_edge(&self, specifier: &str, importer: &Path) -> ResolvedEdge {
        let target = resolve::resolve(specifier, importer, self.aliases.as_ref());
        let external = resolve::is_external_specifier(specifier) && target.is_none();

        ResolvedEdge {
            specifier: specifier.to_string(),
            target,
            external,
        }
    }

    /// On-disk size of a file, memoized per run. Stat failures yield `None`
    /// and are treated as zero by size aggregation.
    pub(crate) fn cached_size(&mut self, path: &Path) -> Option<u64> {
        if let Some(&size) = self.sizes.get(path) {
            return Some(size);
        }
        let size = fs::metadata(path).ok()?.len();
        self.sizes.insert(path.to_path_buf(), size);
        Some(size)
    }

    pub(crate) fn cache_mut(&mut self) -> &mut SourceCache {
        &mut self.cache
    }
}

/// Tests whether an import specifier refers to the search target.
///
/// Matches on exact equality, a `target/` prefix (subpath imports), or
/// basename equality after stripping a `.ts/.tsx/.js/.jsx` suffix — so
/// `utils` matches `./shared/utils.ts` as well as the package `utils`.
pub fn specifier_matches_target(specifier: &str, target: &str) -> bool {
    if specifier == target {
        return true;
    }
    if specifier.len() > target.len()
        && specifier.starts_with(target)
        && specifier.as_bytes()[target.len()] == b'/'
    {
        return true;
    }
    module_basename(specifier) == target
}

/// Last path segment of a specifier with any script extension removed.
fn module_basename(specifier: &str) -> &str {
    let base = specifier.rsplit('/').next().unwrap_or(specifier);
    for ext in [".ts", ".tsx", ".js", ".jsx"] {
        if let Some(stripped) = base.strip_suffix(ext) {
            return stripped;
        }
    }
    base
}

/// Canonicalizes a root path so visited sets agree with resolved edges.
pub(crate) fn canonical_root(root: &Path) -> PathBuf {
    root.canonicalize().unwrap_or_else(|_| root.to_path_buf())
}
