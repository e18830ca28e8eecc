//! Specifier-to-file resolution.
//!
//! Given a raw import specifier and the importing file's location, finds the
//! concrete file on disk the specifier denotes, or `None` when nothing
//! matches. Missing files are a normal `None` result, never an error.

use std::path::{Path, PathBuf};

use super::alias::AliasTable;

/// Extension probe order for extensionless imports. `.ts` wins over `.js`
/// when both exist.
pub const EXTENSION_PROBE_ORDER: [&str; 5] = [".ts", ".tsx", ".js", ".jsx", ".mjs"];

/// Returns true if a specifier denotes an external package rather than a
/// project file: anything that does not start with `.` or `/`.
///
/// Bare specifiers that an alias rule maps onto a project file are still
/// reported as internal once resolution succeeds; this predicate only looks
/// at the raw specifier shape.
pub fn is_external_specifier(specifier: &str) -> bool {
    !specifier.starts_with('.') && !specifier.starts_with('/')
}

/// Resolves a raw import specifier to an absolute file path on disk.
///
/// Relative and absolute specifiers are anchored at the importer's containing
/// directory. Bare specifiers are expanded through the alias table when one
/// is present; without a table (or without a matching rule) they are
/// unresolvable and classified external.
///
/// For a fixed filesystem state and alias table this is a pure function of
/// its inputs.
pub fn resolve(
    specifier: &str,
    importer_path: &Path,
    aliases: Option<&AliasTable>,
) -> Option<PathBuf> {
    let candidate = if is_external_specifier(specifier) {
        aliases?.expand(specifier)?
    } else if specifier.starts_with('/') {
        PathBuf::from(specifier)
    } else {
        let base = importer_path.parent().unwrap_or_else(|| Path::new(""));
        base.join(specifier)
    };

    probe(&candidate)
}

/// Probes a candidate path: the literal path first, then each extension
/// appended, then `index` + each extension inside the path as a directory.
/// The first candidate that is a file wins.
fn probe(candidate: &Path) -> Option<PathBuf> {
    if candidate.is_file() {
        return canonical(candidate);
    }

    let raw = candidate.as_os_str();
    for ext in EXTENSION_PROBE_ORDER {
        let mut with_ext = raw.to_os_string();
        with_ext.push(ext);
        let path = PathBuf::from(with_ext);
        if path.is_file() {
            return canonical(&path);
        }
    }

    for ext in EXTENSION_PROBE_ORDER {
        let path = candidate.join(format!("index{ext}"));
        if path.is_file() {
            return canonical(&path);
        }
    }

    None
}

/// Canonicalizes a resolved hit so that visited sets deduplicate files
/// reached through different lexical paths (`./a/../b` vs `./b`).
fn canonical(path: &Path) -> Option<PathBuf> {
    Some(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
}
