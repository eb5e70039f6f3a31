//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status lines,
//! the verbose per-file copy notices, and the end-of-run summary table.

use crate::sample_category::Category;
use crate::sample_organizer::OrganizeReport;
use colored::*;
use std::path::Path;

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗, written to stderr)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Verbose copy notices and a summary table
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use samplesort::output::OutputFormatter;
    /// OutputFormatter::success("Samples organized successfully.");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use samplesort::output::OutputFormatter;
    /// OutputFormatter::error("Failed to copy kick.wav");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints the planned source and destination of a copy.
    pub fn request(source: &Path, destination: &Path) {
        println!("{}", "Request:".cyan());
        println!("  Source:      {}", source.display());
        println!("  Destination: {}", destination.display());
    }

    /// Prints a confirmation after a file was copied.
    pub fn copied(source: &Path, destination: &Path) {
        println!("{} {}", "✓".green(), "Copied:".green());
        println!("  From: {}", source.display());
        println!("  To:   {}", destination.display());
    }

    /// Prints a summary table with placed files by category and the
    /// outcome counts of the run.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use samplesort::output::OutputFormatter;
    /// use samplesort::sample_organizer::OrganizeReport;
    ///
    /// OutputFormatter::summary_table(&OrganizeReport::default());
    /// ```
    pub fn summary_table(report: &OrganizeReport) {
        Self::header("SUMMARY");

        let width = Category::ALL
            .iter()
            .map(|category| category.label().len())
            .max()
            .unwrap_or(0)
            .max(8); // At least "Category" width

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for category in Category::ALL {
            let count = report.placed_in(category);
            if count == 0 {
                continue;
            }
            println!(
                "{:<width$} | {} {}",
                category.label(),
                count.to_string().green(),
                file_word(count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            report.total_placed().to_string().green().bold(),
            file_word(report.total_placed()),
            width = width
        );

        println!();
        println!("  Copied:    {}", report.copied);
        println!("  Replaced:  {}", report.replaced);
        println!("  Renamed:   {}", report.indexed);
        if report.dropped > 0 {
            println!("  Dropped:   {}", report.dropped.to_string().yellow());
        }
        println!("  Skipped:   {}", report.skipped);
        if report.has_failures() {
            println!("  Failed:    {}", report.failures.len().to_string().red());
        }
    }
}

fn file_word(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_word() {
        assert_eq!(file_word(1), "file");
        assert_eq!(file_word(0), "files");
        assert_eq!(file_word(7), "files");
    }
}
