//! Tree/enumerate traversal mode.
//!
//! Depth-first enumeration of a root file's import graph. The visited set is
//! global to the walk: once a file has been descended into, a repeat
//! encounter is reported as already visited and never re-expanded, which
//! bounds output on cyclic and diamond-shaped graphs.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::{canonical_root, Walker, MAX_DEPTH};

/// Options for the enumerate walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    /// Restrict the emitted edge list to external imports only. Internal
    /// edges are neither shown nor traversed; cycle protection stays active.
    pub external_only: bool,
}

/// One entry in the ordered emission stream handed to the reporter.
///
/// Depth is tracked for indentation and labeling only; it does not bound the
/// traversal — the visited set does (plus the hard recursion ceiling).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeEvent {
    /// The root file the walk started from
    Root {
        path: PathBuf,
        size: Option<u64>,
    },
    /// A resolved or external import edge
    Import {
        depth: usize,
        specifier: String,
        external: bool,
        size: Option<u64>,
    },
    /// A file encountered again within the same walk; not re-expanded
    AlreadyVisited { depth: usize, path: PathBuf },
    /// An internal-shaped specifier that resolved to nothing (non-fatal)
    Unresolved { depth: usize, specifier: String },
    /// The recursion ceiling was hit; deeper edges were not enumerated
    DepthLimit { depth: usize },
}

impl Walker {
    /// Enumerates a root file's dependency tree as an ordered event stream.
    ///
    /// External imports are listed but never expanded. The visited set is
    /// fresh for each call, so back-to-back roots do not suppress each
    /// other's output.
    pub fn enumerate(&mut self, root: &Path, options: TreeOptions) -> Vec<TreeEvent> {
        let root = canonical_root(root);
        let mut events = Vec::new();
        let mut seen = HashSet::new();

        events.push(TreeEvent::Root {
            size: self.cached_size(&root),
            path: root.clone(),
        });
        self.enumerate_file(&root, 0, options, &mut seen, &mut events);

        events
    }

    fn enumerate_file(
        &mut self,
        path: &Path,
        depth: usize,
        options: TreeOptions,
        seen: &mut HashSet<PathBuf>,
        events: &mut Vec<TreeEvent>,
    ) {
        if depth > MAX_DEPTH {
            events.push(TreeEvent::DepthLimit { depth });
            return;
        }

        if !seen.insert(path.to_path_buf()) {
            events.push(TreeEvent::AlreadyVisited {
                depth,
                path: path.to_path_buf(),
            });
            return;
        }

        let Some(unit) = self.cache_mut().load(path) else {
            return;
        };

        for import in &unit.imports {
            let edge = self.resolve_edge(&import.specifier, path);

            if options.external_only && !edge.external {
                continue;
            }

            if edge.external {
                events.push(TreeEvent::Import {
                    depth,
                    specifier: edge.specifier,
                    external: true,
                    size: None,
                });
                continue;
            }

            match edge.target {
                Some(target) => {
                    events.push(TreeEvent::Import {
                        depth,
                        specifier: edge.specifier,
                        external: false,
                        size: self.cached_size(&target),
                    });
                    self.enumerate_file(&target, depth + 1, options, seen, events);
                }
                None => {
                    events.push(TreeEvent::Unresolved {
                        depth,
                        specifier: edge.specifier,
                    });
                }
            }
        }
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

    fn walker() -> Walker {
        Walker::new(None).unwrap()
    }

    fn import_specs(events: &[TreeEvent]) -> Vec<(usize, String, bool)> {
        events
            .iter()
            .filter_map(|e| match e {
                TreeEvent::Import {
                    depth,
                    specifier,
                    external,
                    ..
                } => Some((*depth, specifier.clone(), *external)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_enumerate_lists_edges_in_source_order() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "a.ts", "import 'react';\nimport './b';\n");
        write(&dir, "b.ts", "import 'lodash';\n");

        let events = walker().enumerate(&root, TreeOptions::default());

        assert!(matches!(events[0], TreeEvent::Root { .. }));
        let specs = import_specs(&events);
        assert_eq!(
            specs,
            vec![
                (0, "react".to_string(), true),
                (0, "./b".to_string(), false),
                (1, "lodash".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_enumerate_reports_cycle_as_already_visited() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "a.ts", "import './b';\n");
        write(&dir, "b.ts", "import './a';\n");

        let events = walker().enumerate(&root, TreeOptions::default());

        let revisits: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, TreeEvent::AlreadyVisited { .. }))
            .collect();
        assert_eq!(revisits.len(), 1);
        match revisits[0] {
            TreeEvent::AlreadyVisited { depth, path } => {
                assert_eq!(*depth, 2);
                assert!(path.ends_with("a.ts"));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_enumerate_diamond_expands_shared_dep_once() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "root.ts", "import './b';\nimport './c';\n");
        write(&dir, "b.ts", "import './d';\n");
        write(&dir, "c.ts", "import './d';\n");
        write(&dir, "d.ts", "import 'react';\n");

        let events = walker().enumerate(&root, TreeOptions::default());

        // d is expanded under b; under c it is reported as already visited
        let react_edges = import_specs(&events)
            .into_iter()
            .filter(|(_, s, _)| s == "react")
            .count();
        assert_eq!(react_edges, 1);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, TreeEvent::AlreadyVisited { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_external_only_hides_and_skips_internal_edges() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "a.ts", "import 'react';\nimport './b';\n");
        write(&dir, "b.ts", "import 'lodash';\n");

        let events = walker().enumerate(&root, TreeOptions { external_only: true });

        let specs = import_specs(&events);
        // './b' is hidden and not traversed, so 'lodash' never appears
        assert_eq!(specs, vec![(0, "react".to_string(), true)]);
    }

    #[test]
    fn test_external_only_keeps_cycle_protection() {
        let dir = TempDir::new().unwrap();
        // Self-import: traversal must still terminate with external_only off
        let root = write(&dir, "a.ts", "import './a';\nimport 'react';\n");

        let events = walker().enumerate(&root, TreeOptions::default());
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, TreeEvent::AlreadyVisited { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_unresolved_internal_edge_is_warned_not_fatal() {
        let dir = TempDir::new().unwrap();
        let root = write(&dir, "a.ts", "import './missing';\nimport './b';\n");
        write(&dir, "b.ts", "");

        let events = walker().enumerate(&root, TreeOptions::default());

        assert!(events
            .iter()
            .any(|e| matches!(e, TreeEvent::Unresolved { specifier, .. } if specifier == "./missing")));
        // The sibling edge after the miss is still walked
        assert!(import_specs(&events).iter().any(|(_, s, _)| s == "./b"));
    }

    #[test]
    fn test_fresh_visited_set_per_walk() {
        let dir = TempDir::new().unwrap();
        let a = write(&dir, "a.ts", "import './shared';\n");
        let b = write(&dir, "b.ts", "import './shared';\n");
        write(&dir, "shared.ts", "import 'react';\n");

        let mut w = walker();
        let first = walker_specs(&mut w, &a);
        let second = walker_specs(&mut w, &b);

        // The second root is not starved by the first root's visited set
        assert!(first.contains(&"react".to_string()));
        assert!(second.contains(&"react".to_string()));
    }

    fn walker_specs(w: &mut Walker, root: &Path) -> Vec<String> {
        import_specs(&w.enumerate(root, TreeOptions::default()))
            .into_iter()
            .map(|(_, s, _)| s)
            .collect()
    }

    #[test]
    fn test_depth_ceiling_yields_diagnostic_not_crash() {
        let dir = TempDir::new().unwrap();
        let deep = MAX_DEPTH + 3;
        for i in 0..deep {
            write(&dir, &format!("f{i}.ts"), &format!("import './f{}';\n", i + 1));
        }
        write(&dir, &format!("f{deep}.ts"), "export {};\n");
        let root = dir.path().join("f0.ts");

        let events = walker().enumerate(&root, TreeOptions::default());
        assert!(events
            .iter()
            .any(|e| matches!(e, TreeEvent::DepthLimit { .. })));
    }

    #[test]
    fn test_alias_resolved_import_is_internal_and_expanded() {
        use crate::resolve::{AliasRule, AliasTable};

        let dir = TempDir::new().unwrap();
        let root = write(&dir, "src/index.ts", "import '@app/button';\n");
        write(&dir, "src/app/button.tsx", "import 'react';\n");

        let table = AliasTable::from_rules(
            dir.path().join("src"),
            vec![AliasRule {
                pattern: "@app/*".to_string(),
                replacement: "app/*".to_string(),
            }],
        );
        let mut w = Walker::new(Some(table)).unwrap();

        let specs = import_specs(&w.enumerate(&root, TreeOptions::default()));
        assert_eq!(
            specs,
            vec![
                (0, "@app/button".to_string(), false),
                (1, "react".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_root_event_carries_size() {
        let dir = TempDir::new().unwrap();
        let content = "import 'react';\n";
        let root = write(&dir, "a.ts", content);

        let events = walker().enumerate(&root, TreeOptions::default());
        match &events[0] {
            TreeEvent::Root { size, .. } => assert_eq!(*size, Some(content.len() as u64)),
            _ => panic!("first event must be Root"),
        }
    }
}
