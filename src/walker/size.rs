//! Size-aggregation traversal mode.
//!
//! Computes, per root, the cumulative on-disk byte size of the root plus
//! every internal file transitively reachable from it. The visited set is
//! fresh per root: a file shared between two sibling imports within one root
//! counts once, while a file shared between two different roots counts once
//! per root.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{canonical_root, Walker, MAX_DEPTH};

/// Cumulative size result for one root file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeReport {
    /// The root file the total was computed for
    pub root: PathBuf,
    /// Total bytes: root plus all transitively reachable internal files,
    /// each counted once
    pub total_bytes: u64,
}

impl Walker {
    /// Total cumulative byte size pulled in by one root file.
    ///
    /// External imports contribute zero and are not expanded. Files whose
    /// size cannot be read contribute zero, not an error.
    pub fn total_size(&mut self, root: &Path) -> u64 {
        let root = canonical_root(root);
        let mut visited = HashSet::new();
        self.size_of(&root, 0, &mut visited)
    }

    fn size_of(&mut self, path: &Path, depth: usize, visited: &mut HashSet<PathBuf>) -> u64 {
        if depth > MAX_DEPTH {
            eprintln!(
                "Warning: import chain exceeds depth {} at {}; deeper files not counted",
                MAX_DEPTH,
                path.display()
            );
            return 0;
        }

        if !visited.insert(path.to_path_buf()) {
            return 0;
        }

        let mut total = self.cached_size(path).unwrap_or(0);

        let Some(unit) = self.cache_mut().load(path) else {
            return total;
        };

        for import in &unit.imports {
            let edge = self.resolve_edge(&import.specifier, path);
            if let Some(target) = edge.target {
                total += self.size_of(&target, depth + 1, visited);
            }
        }

        total
    }

    /// Computes totals for several roots and ranks them by descending size.
    ///
    /// Ties keep the roots' input order (stable sort). Each root gets its
    /// own visited set; shared dependencies are counted once per root.
    pub fn rank_by_size(&mut self, roots: &[PathBuf]) -> Vec<SizeReport> {
        let mut reports: Vec<SizeReport> = roots
            .iter()
            .map(|root| SizeReport {
                root: root.clone(),
                total_bytes: self.total_size(root),
            })
            .collect();

        reports.sort_by(|a, b| b.total_bytes.cmp(&a.total_bytes));
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, rel: &str, content: &str) -> PathBuf {
        let path = dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn size_of_file(path: &Path) -> u64 {
        fs::metadata(path).unwrap().len()
    }

    #[test]
    fn test_total_size_sums_transitive_closure() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "a.ts", "import './b';\n");
        let b = write(&dir, "b.ts", "import './c';\nimport 'react';\n");
        let c = write(&dir, "c.ts", "export const c = 1;\n");

        let total = Walker::new(None).unwrap().total_size(&root);

        assert_eq!(
            total,
            size_of_file(&root) + size_of_file(&b) + size_of_file(&c)
        );
    }

    #[test]
    fn test_diamond_counts_shared_dep_once() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "root.ts", "import './b';\nimport './c';\n");
        let b = write(&dir, "b.ts", "import './d';\n");
        let c = write(&dir, "c.ts", "import './d';\n");
        let d = write(&dir, "d.ts", "export const d = 'payload';\n");

        let total = Walker::new(None).unwrap().total_size(&root);

        assert_eq!(
            total,
            size_of_file(&root) + size_of_file(&b) + size_of_file(&c) + size_of_file(&d)
        );
    }

    #[test]
    fn test_cycle_terminates_and_counts_each_file_once() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import './b';\n");
        let b = write(&dir, "b.ts", "import './a';\n");

        let total = Walker::new(None).unwrap().total_size(&a);
        assert_eq!(total, size_of_file(&a) + size_of_file(&b));
    }

    #[test]
    fn test_externals_contribute_zero() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "a.ts", "import 'react';\nimport 'lodash';\n");

        let total = Walker::new(None).unwrap().total_size(&root);
        assert_eq!(total, size_of_file(&root));
    }

    #[test]
    fn test_unresolved_internal_contributes_zero() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "a.ts", "import './missing';\n");

        let total = Walker::new(None).unwrap().total_size(&root);
        assert_eq!(total, size_of_file(&root));
    }

    #[test]
    fn test_no_cross_root_dedup() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import './shared';\n");
        let b = write(&dir, "b.ts", "import './shared';\n");
        let shared = write(&dir, "shared.ts", "export const s = 'shared-bytes';\n");

        let mut walker = Walker::new(None).unwrap();
        let reports = walker.rank_by_size(&[a.clone(), b.clone()]);

        // shared.ts is counted once within each root's total
        let expected_a = size_of_file(&a) + size_of_file(&shared);
        let expected_b = size_of_file(&b) + size_of_file(&shared);
        let totals: Vec<u64> = reports.iter().map(|r| r.total_bytes).collect();
        assert!(totals.contains(&expected_a));
        assert!(totals.contains(&expected_b));
    }

    #[test]
    fn test_ranking_descending_with_stable_ties() {
        let dir = TempDir::new().unwrap();
        let small = write(&dir, "small.ts", "x\n");
        let tie_one = write(&dir, "tie_one.ts", "same-size-a\n");
        let tie_two = write(&dir, "tie_two.ts", "same-size-b\n");
        let big = write(&dir, "big.ts", "import './payload';\n");
        write(&dir, "payload.ts", &"p".repeat(4096));

        let mut walker = Walker::new(None).unwrap();
        let reports = walker.rank_by_size(&[
            small.clone(),
            tie_one.clone(),
            tie_two.clone(),
            big.clone(),
        ]);

        assert_eq!(reports[0].root, big);
        // Equal totals keep input order
        assert_eq!(reports[1].root, tie_one);
        assert_eq!(reports[2].root, tie_two);
        assert_eq!(reports[3].root, small);
    }
}
