//! Per-run source unit cache.
//!
//! Files are parsed lazily on first resolution and cached for the rest of
//! the run. A file that cannot be read or parsed is cached as absent, warned
//! about once, and skipped by every traversal that touches it afterwards.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::parser::{AnalysisResult, Import, ImportAnalyzer};

/// One loaded source file: its absolute path and its raw import specifiers
/// in source order (duplicates preserved). Immutable once loaded.
#[derive(Debug)]
pub struct SourceUnit {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Raw import specifiers in source order
    pub imports: Vec<Import>,
}

/// Cache mapping file paths to parsed source units.
///
/// Accessed from one logical thread of control at a time; no locking.
pub struct SourceCache {
    analyzer: ImportAnalyzer,
    units: HashMap<PathBuf, Option<Rc<SourceUnit>>>,
}

impl SourceCache {
    /// Creates an empty cache with freshly initialized parsers.
    pub fn new() -> AnalysisResult<Self> {
        Ok(Self {
            analyzer: ImportAnalyzer::new()?,
            units: HashMap::new(),
        })
    }

    /// Loads a source unit, parsing the file on first access.
    ///
    /// Returns `None` when the file cannot be read or parsed; the failure is
    /// reported once and remembered so siblings and later walks continue
    /// without re-reading.
    pub fn load(&mut self, path: &Path) -> Option<Rc<SourceUnit>> {
        if let Some(cached) = self.units.get(path) {
            return cached.clone();
        }

        let unit = match self.analyzer.analyze_file(path) {
            Ok(imports) => Some(Rc::new(SourceUnit {
                path: path.to_path_buf(),
                imports,
            })),
            Err(e) => {
                eprintln!("Warning: failed to analyze {}: {}", path.display(), e);
                None
            }
        };

        self.units.insert(path.to_path_buf(), unit.clone());
        unit
    }

    /// Number of cached entries, including remembered failures.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
