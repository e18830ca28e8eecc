//! Chain-tracing traversal mode.
//!
//! Finds every simple path from a root file to a file whose direct imports
//! match the target. The visited set is scoped to the current path stack and
//! reverted on backtrack, so the same file may appear in several distinct
//! chains while cycles still terminate.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{canonical_root, specifier_matches_target, Walker, MAX_DEPTH};

/// One import chain: the files on the path from the root to the file that
/// directly imports the target, in order.
pub type Chain = Vec<PathBuf>;

impl Walker {
    /// Traces every simple import path from `root` to a file that directly
    /// imports `target`.
    ///
    /// When a file's imports match the target, the current path stack is
    /// recorded as one chain and that branch is not descended further.
    pub fn trace(&mut self, root: &Path, target: &str) -> Vec<Chain> {
        let root = canonical_root(root);
        let mut chains = Vec::new();
        let mut stack = Vec::new();
        let mut visited = HashSet::new();

        self.trace_file(&root, target, &mut stack, &mut visited, &mut chains);

        chains
    }

    fn trace_file(
        &mut self,
        path: &Path,
        target: &str,
        stack: &mut Vec<PathBuf>,
        visited: &mut HashSet<PathBuf>,
        chains: &mut Vec<Chain>,
    ) {
        if stack.len() > MAX_DEPTH {
            eprintln!(
                "Warning: import chain exceeds depth {} at {}; branch abandoned",
                MAX_DEPTH,
                path.display()
            );
            return;
        }

        // Path-stack scoped: a file already on the current path is a cycle
        if !visited.insert(path.to_path_buf()) {
            return;
        }
        stack.push(path.to_path_buf());

        if let Some(unit) = self.cache_mut().load(path) {
            let matches = unit
                .imports
                .iter()
                .any(|i| specifier_matches_target(&i.specifier, target));

            if matches {
                chains.push(stack.clone());
            } else {
                for import in &unit.imports {
                    let edge = self.resolve_edge(&import.specifier, path);
                    if let Some(resolved) = edge.target {
                        self.trace_file(&resolved, target, stack, visited, chains);
                    }
                }
            }
        }

        // Backtrack: the file may appear again along a different branch
        stack.pop();
        visited.remove(path);
    }
}
