use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::style::Stylize;

use modtrace::parser::collect_source_files;
use modtrace::report;
use modtrace::resolve::AliasTable;
use modtrace::walker::{TreeOptions, Walker};

#[derive(Parser)]
#[command(name = "modtrace")]
#[command(version = "0.1.0")]
#[command(about = "Analyze module-import graphs of JavaScript/TypeScript source trees", long_about = None)]
struct Cli {
    /// Entry file or directory to analyze
    path: PathBuf,

    /// Show a nested dependency tree with file sizes
    #[arg(long)]
    tree: bool,

    /// Only show external packages
    #[arg(long)]
    external_only: bool,

    /// Find which entry files directly import a specific package
    #[arg(long, value_name = "PACKAGE")]
    find: Option<String>,

    /// Trace import chains from each entry file to a target module or package
    #[arg(long, value_name = "TARGET")]
    trace: Option<String>,

    /// Rank entry files by cumulative dependency size
    #[arg(long)]
    size: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The only fatal condition: the entry path itself does not exist.
    let entry = cli
        .path
        .canonicalize()
        .with_context(|| format!("entry path does not exist: {}", cli.path.display()))?;

    println!("{}", format!("Analyzing: {}", entry.display()).blue());

    let roots = if entry.is_dir() {
        collect_source_files(&entry)
    } else {
        vec![entry.clone()]
    };
    if roots.is_empty() {
        bail!(
            "no JavaScript/TypeScript files found under {}",
            entry.display()
        );
    }

    // Alias table is loaded once per run, from the invocation directory.
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let aliases = AliasTable::load(&cwd);
    let mut walker = Walker::new(aliases).context("failed to initialize parsers")?;

    if cli.size {
        let reports = walker.rank_by_size(&roots);
        report::render_size_table(&reports);
        return Ok(());
    }

    if let Some(target) = &cli.trace {
        let mut chains = Vec::new();
        for root in &roots {
            chains.extend(walker.trace(root, target));
        }
        report::render_chains(target, &chains);
        return Ok(());
    }

    if let Some(target) = &cli.find {
        let found = walker.find_importers(&roots, target);
        report::render_found(target, &found);
        return Ok(());
    }

    let options = TreeOptions {
        external_only: cli.external_only,
    };
    for root in &roots {
        println!(
            "\n{}\n",
            format!("📁 Component: {}", report::display_path(root)).green()
        );
        let events = walker.enumerate(root, options);
        report::render_tree(&events, cli.tree);
    }

    Ok(())
}
