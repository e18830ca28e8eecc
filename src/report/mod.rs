//! Result rendering for modtrace.
//!
//! The traversal engine hands over plain data (event streams, size reports,
//! chains, file lists); everything about text, color, and units lives here.

use std::path::Path;

use crossterm::style::Stylize;

use crate::walker::{SizeReport, TreeEvent};

/// Formats a byte count into a human-readable size string.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Path label relative to the current directory, falling back to the full
/// path when the file lives outside it.
pub fn display_path(path: &Path) -> String {
    let cwd = std::env::current_dir().unwrap_or_default();
    path.strip_prefix(&cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Basename with any script extension removed, for compact chain output.
fn module_label(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| basename(path))
}

fn event_depth(event: &TreeEvent) -> usize {
    match event {
        TreeEvent::Root { .. } => 0,
        TreeEvent::Import { depth, .. }
        | TreeEvent::AlreadyVisited { depth, .. }
        | TreeEvent::Unresolved { depth, .. }
        | TreeEvent::DepthLimit { depth } => *depth,
    }
}

/// Whether the event at `index` is the last edge of its sibling group,
/// for branch-glyph selection.
fn is_last_sibling(events: &[TreeEvent], index: usize) -> bool {
    let depth = event_depth(&events[index]);
    for later in &events[index + 1..] {
        let later_depth = event_depth(later);
        if later_depth < depth {
            return true;
        }
        if later_depth == depth {
            return !matches!(
                later,
                TreeEvent::Import { .. } | TreeEvent::Unresolved { .. }
            );
        }
    }
    true
}

/// Renders the enumerate event stream.
///
/// With `tree` set, edges get branch glyphs and on-disk sizes; without it,
/// the same stream renders as a flat indented list.
pub fn render_tree(events: &[TreeEvent], tree: bool) {
    for (index, event) in events.iter().enumerate() {
        let indent = "  ".repeat(event_depth(event));

        match event {
            TreeEvent::Root { path, size } => {
                if tree {
                    let size_str = size.map(|s| format!(" ({})", format_size(s))).unwrap_or_default();
                    println!("📄 {}{}", basename(path).cyan(), size_str);
                }
            }
            TreeEvent::Import {
                specifier,
                external,
                size,
                ..
            } => {
                let branch = if tree {
                    if is_last_sibling(events, index) {
                        "└── "
                    } else {
                        "├── "
                    }
                } else {
                    ""
                };
                let size_str = if tree {
                    size.map(|s| format!(" ({})", format_size(s))).unwrap_or_default()
                } else {
                    String::new()
                };
                if *external {
                    println!("{indent}{branch}📦 {}{}", specifier.as_str().yellow(), size_str);
                } else {
                    println!("{indent}{branch}🔗 {}{}", specifier.as_str().cyan(), size_str);
                }
            }
            TreeEvent::AlreadyVisited { path, .. } => {
                println!(
                    "{indent}{} {}",
                    "(already visited)".grey(),
                    basename(path)
                );
            }
            TreeEvent::Unresolved { specifier, .. } => {
                println!(
                    "{indent}{} {}",
                    "⚠️  Failed to resolve:".red(),
                    specifier
                );
            }
            TreeEvent::DepthLimit { depth } => {
                println!(
                    "{indent}{}",
                    format!("⚠️  Depth limit reached at {depth}; not descending further").red()
                );
            }
        }
    }
}

/// Renders the per-root size ranking, largest first.
pub fn render_size_table(reports: &[SizeReport]) {
    println!("\n{}", "📦 Component Size Analysis:".green());
    println!();

    for (rank, report) in reports.iter().enumerate() {
        let label = display_path(&report.root);
        let styled = match rank {
            0 => label.red().bold(),
            1 => label.yellow().bold(),
            2 => label.magenta(),
            _ => label.cyan(),
        };
        println!(
            "{} -> {}",
            styled,
            format_size(report.total_bytes).bold()
        );
    }

    println!();
}

/// Renders import chains for one trace target, indented and compact.
pub fn render_chains(target: &str, chains: &[Vec<std::path::PathBuf>]) {
    if chains.is_empty() {
        println!("{}", format!("⚠️  No import chains found to: {target}").yellow());
        return;
    }

    println!("{}\n", format!("✔ Found import chains to: {target}").green());

    for chain in chains {
        for (i, file) in chain.iter().enumerate() {
            let label = display_path(file);
            if i == 0 {
                println!("📄 {label}");
            } else {
                println!("{}↳ {label}", "  ".repeat(i));
            }
        }
        println!();

        let compact: Vec<String> = chain.iter().map(|f| module_label(f)).collect();
        println!("🔗 Chain: {}\n", compact.join(" -> "));
    }
}

/// Renders the package-usage search result.
pub fn render_found(target: &str, files: &[std::path::PathBuf]) {
    if files.is_empty() {
        println!("{}", format!("⚠️  No files found importing: {target}").yellow());
        return;
    }

    println!("\n{}", "✔ Found in:".green());
    for file in files {
        println!("- {}", display_path(file));
    }
}
