//! Path-alias table loaded from tsconfig.json.
//!
//! Mirrors the `compilerOptions.paths` / `baseUrl` mechanism: each entry maps
//! a specifier pattern (with at most one `*` wildcard) to replacement path
//! templates anchored at `baseUrl`. Rule order is the declaration order in
//! the config file; matching is first-match-wins.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Raw tsconfig.json shape, limited to the fields alias resolution needs.
#[derive(Debug, Deserialize, Default)]
struct TsConfig {
    #[serde(rename = "compilerOptions", default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Deserialize, Default)]
struct CompilerOptions {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,

    // serde_json's preserve_order feature keeps declaration order here,
    // which first-match-wins semantics depend on.
    paths: Option<serde_json::Map<String, serde_json::Value>>,
}

/// One alias pattern -> replacement template mapping.
///
/// Only the first replacement template declared for a pattern is honored,
/// even when the config lists several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRule {
    /// Specifier pattern, containing at most one `*` wildcard
    pub pattern: String,
    /// Replacement path template; `*` is substituted with the wildcard capture
    pub replacement: String,
}

impl AliasRule {
    /// Matches a specifier against this rule's pattern.
    ///
    /// Returns the wildcard capture on a match (empty for exact patterns),
    /// `None` otherwise.
    fn capture<'a>(&self, specifier: &'a str) -> Option<&'a str> {
        match self.pattern.split_once('*') {
            None => (specifier == self.pattern).then_some(""),
            Some((prefix, suffix)) => {
                if specifier.len() >= prefix.len() + suffix.len()
                    && specifier.starts_with(prefix)
                    && specifier.ends_with(suffix)
                {
                    Some(&specifier[prefix.len()..specifier.len() - suffix.len()])
                } else {
                    None
                }
            }
        }
    }
}

/// Alias table for one run: ordered rules plus the base directory that
/// anchors resolved replacements.
#[derive(Debug, Clone)]
pub struct AliasTable {
    base_dir: PathBuf,
    rules: Vec<AliasRule>,
}

impl AliasTable {
    /// Loads the alias table from the nearest tsconfig.json at or above
    /// `start_dir`.
    ///
    /// Returns `None` when no config is found, the config cannot be read or
    /// parsed, or it declares no path mappings; resolution then degenerates
    /// to relative-only. Absence is never an error.
    pub fn load(start_dir: &Path) -> Option<Self> {
        let config_path = find_config(start_dir)?;
        let content = fs::read_to_string(&config_path).ok()?;
        let config: TsConfig = serde_json::from_str(&content).ok()?;

        let config_dir = config_path.parent().unwrap_or(Path::new("."));
        let base_url = config.compiler_options.base_url.unwrap_or_else(|| ".".to_string());
        let base_dir = config_dir.join(base_url);

        let paths = config.compiler_options.paths?;
        let rules: Vec<AliasRule> = paths
            .into_iter()
            .filter_map(|(pattern, value)| {
                // Only the first replacement template per pattern is honored.
                let replacement = value.as_array()?.first()?.as_str()?.to_string();
                Some(AliasRule {
                    pattern,
                    replacement,
                })
            })
            .collect();

        if rules.is_empty() {
            return None;
        }

        Some(Self { base_dir, rules })
    }

    /// Builds a table directly from rules, for tests and embedding.
    pub fn from_rules(base_dir: impl Into<PathBuf>, rules: Vec<AliasRule>) -> Self {
        Self {
            base_dir: base_dir.into(),
            rules,
        }
    }

    /// The directory that anchors resolved replacement templates.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The alias rules in declaration order.
    pub fn rules(&self) -> &[AliasRule] {
        &self.rules
    }

    /// Expands a bare specifier through the alias rules.
    ///
    /// Tries each rule in declaration order; the first match wins. The
    /// wildcard capture replaces the first `*` in the rule's replacement
    /// template, and the result is anchored at the base directory. The
    /// returned path has not been probed for existence.
    pub fn expand(&self, specifier: &str) -> Option<PathBuf> {
        for rule in &self.rules {
            if let Some(capture) = rule.capture(specifier) {
                let replaced = rule.replacement.replacen('*', capture, 1);
                return Some(self.base_dir.join(replaced));
            }
        }
        None
    }
}

/// Finds the nearest tsconfig.json walking upward from `start_dir`.
fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut dir = Some(start_dir);
    while let Some(current) = dir {
        let candidate = current.join("tsconfig.json");
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}
