//! Package-usage search mode.
//!
//! Tests each root file's direct imports against the target. Deliberately
//! non-recursive: a root whose transitive dependencies import the target is
//! not a match.

use std::path::{Path, PathBuf};

use super::{specifier_matches_target, Walker};

impl Walker {
    /// Returns true if `root` directly imports the target package or module.
    pub fn imports_target(&mut self, root: &Path, target: &str) -> bool {
        let root = super::canonical_root(root);
        match self.cache_mut().load(&root) {
            Some(unit) => unit
                .imports
                .iter()
                .any(|i| specifier_matches_target(&i.specifier, target)),
            None => false,
        }
    }

    /// Collects the roots that directly import the target, in input order.
    pub fn find_importers(&mut self, roots: &[PathBuf], target: &str) -> Vec<PathBuf> {
        roots
            .iter()
            .filter(|root| self.imports_target(root, target))
            .cloned()
            .collect()
    }
}
