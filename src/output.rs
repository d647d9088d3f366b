//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored output,
//! progress tracking, and formatted tables. This module abstracts away output details,
//! making it easy to change formatting globally.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Progress bars for operations
/// - Summary tables with per-formatter statistics
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use beautidir::output::OutputFormatter;
    /// OutputFormatter::success("All files beautified!");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use beautidir::output::OutputFormatter;
    /// OutputFormatter::error("Failed to beautify file");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use beautidir::output::OutputFormatter;
    /// OutputFormatter::info("Beautifying contents of: ./static");
    /// ```
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates and returns a progress bar for file operations.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use beautidir::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1); // Increment by 1
    /// pb.finish_with_message("Completed!");
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints a summary table with file statistics by formatter.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use beautidir::output::OutputFormatter;
    /// use std::collections::HashMap;
    ///
    /// let mut counts = HashMap::new();
    /// counts.insert("javascript".to_string(), 15);
    /// counts.insert("json".to_string(), 8);
    /// OutputFormatter::summary_table(&counts, 23);
    /// ```
    pub fn summary_table(formatter_counts: &HashMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        // Sort formatters for consistent output
        let mut formatters: Vec<_> = formatter_counts.iter().collect();
        formatters.sort_by_key(|&(name, _)| name);

        // Calculate column widths
        let max_formatter_len = formatters
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(9); // At least "Formatter" width

        // Print header
        println!(
            "{:<width$} | {}",
            "Formatter".bold(),
            "Files".bold(),
            width = max_formatter_len
        );
        println!("{}", "-".repeat(max_formatter_len + 10));

        // Print rows
        for (formatter, count) in &formatters {
            let file_word = if **count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                formatter,
                count.to_string().green(),
                file_word,
                width = max_formatter_len
            );
        }

        // Print footer
        println!("{}", "-".repeat(max_formatter_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            if total_files == 1 { "file" } else { "files" },
            width = max_formatter_len
        );
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}
