//! Command-line interface module for beautidir.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Recursive file discovery
//! - Formatter dispatch by extension
//! - Exclusion rule application
//! - The in-place beautification loop

use crate::config::{CompiledExcludes, ExcludeConfig};
use crate::dispatch::{Formatter, FormatterMap};
use crate::output::OutputFormatter;
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively beautify JavaScript, JSON and HTML files in place.
#[derive(Parser, Debug)]
#[command(name = "beautidir", version, about)]
pub struct Cli {
    /// Directory to beautify.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Show what would be beautified without writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Path to a TOML configuration file with exclusion rules.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// A file scheduled for beautification, with the formatter that handles it.
#[derive(Debug, Clone)]
pub struct BeautifyTarget {
    /// The full path to the file.
    pub path: PathBuf,
    /// The formatter dispatched for the file's extension.
    pub formatter: Formatter,
}

/// Runs the beautifier over a directory tree with default configuration.
///
/// # Examples
///
/// ```no_run
/// use beautidir::cli::run_cli;
/// use std::path::Path;
///
/// let result = run_cli(Path::new("/path/to/project"));
/// match result {
///     Ok(()) => println!("Operation completed successfully"),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(root: &Path) -> Result<(), String> {
    run_cli_with_config(root, false, None)
}

/// Runs the beautifier with optional dry-run mode and configuration file.
///
/// This function:
/// 1. Loads and compiles the exclusion configuration (if available)
/// 2. Walks the directory tree in deterministic filename order
/// 3. Dispatches each file to a formatter by extension
/// 4. Rewrites each matched file in place with its beautified content
/// 5. Shows a summary of files by formatter
///
/// The first read, format or write failure aborts the run; files after the
/// failing one are left untouched.
///
/// # Arguments
///
/// * `root` - The directory to beautify
/// * `dry_run` - If true, report what would change without writing anything
/// * `config_path` - Optional path to configuration file
pub fn run_cli_with_config(
    root: &Path,
    dry_run: bool,
    config_path: Option<&Path>,
) -> Result<(), String> {
    OutputFormatter::info(&format!("Beautifying contents of: {}", root.display()));

    // Load and compile exclusion configuration
    let config = ExcludeConfig::load(config_path)
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let excludes = config
        .compile()
        .map_err(|e| format!("Error compiling exclusion rules: {}", e))?;

    let map = FormatterMap::new();
    let targets = collect_targets(root, &map, &excludes)?;

    if targets.is_empty() {
        OutputFormatter::plain("No files found to beautify.");
        return Ok(());
    }

    if dry_run {
        return report_dry_run(&targets);
    }

    let pb = OutputFormatter::create_progress_bar(targets.len() as u64);
    let mut formatter_counts: HashMap<String, usize> = HashMap::new();

    for target in &targets {
        pb.println(format!("Beautifying {}...", target.path.display()));
        if let Err(e) = beautify_file(target) {
            pb.finish_and_clear();
            return Err(e);
        }
        *formatter_counts
            .entry(target.formatter.name().to_string())
            .or_insert(0) += 1;
        pb.inc(1);
    }
    pb.finish_and_clear();

    OutputFormatter::summary_table(&formatter_counts, targets.len());
    OutputFormatter::success("All files beautified!");
    Ok(())
}

/// Walks the tree under `root` and collects the files to beautify.
///
/// Entries are visited in filename order within each directory, so runs are
/// deterministic. Directories are never targets; files whose extension has
/// no formatter, and files matching the exclusion rules, are skipped.
/// Exclusion globs are matched against the path relative to `root`.
pub fn collect_targets(
    root: &Path,
    map: &FormatterMap,
    excludes: &CompiledExcludes,
) -> Result<Vec<BeautifyTarget>, String> {
    let mut targets = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.map_err(|e| format!("Error reading directory {}: {}", root.display(), e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        if excludes.is_excluded(relative) {
            continue;
        }

        if let Some(formatter) = map.for_path(path) {
            targets.push(BeautifyTarget {
                path: path.to_path_buf(),
                formatter,
            });
        }
    }

    Ok(targets)
}

/// Reads, formats and rewrites one file in place.
fn beautify_file(target: &BeautifyTarget) -> Result<(), String> {
    let content = fs::read_to_string(&target.path)
        .map_err(|e| format!("Error reading {}: {}", target.path.display(), e))?;

    let beautified = target
        .formatter
        .apply(&content)
        .map_err(|e| format!("Error beautifying {}: {}", target.path.display(), e))?;

    fs::write(&target.path, beautified)
        .map_err(|e| format!("Error writing {}: {}", target.path.display(), e))
}

/// Reports what a run would do without touching any files.
fn report_dry_run(targets: &[BeautifyTarget]) -> Result<(), String> {
    let mut formatter_counts: HashMap<String, usize> = HashMap::new();

    for target in targets {
        OutputFormatter::dry_run_notice(&format!(
            "Would beautify {} [{}]",
            target.path.display(),
            target.formatter.name()
        ));
        *formatter_counts
            .entry(target.formatter.name().to_string())
            .or_insert(0) += 1;
    }

    OutputFormatter::summary_table(&formatter_counts, targets.len());
    OutputFormatter::plain("Dry run complete. No files were modified.");
    Ok(())
}
