//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::OwoColorize;
use responder_geo::CoverageSummary;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// Print the coverage summary panel
pub fn print_summary(summary: &CoverageSummary) {
    Status::header("Coverage Summary");
    println!("  {:<18} {}", "Total assets:", summary.total);
    println!(
        "  {:<18} {} ({})",
        "Covered:",
        summary.covered.to_string().green(),
        format_percent(summary.covered, summary.total)
    );
    println!(
        "  {:<18} {}",
        "Uncovered:",
        summary.uncovered.to_string().red()
    );
}

/// Format a share of a total as a percentage
pub fn format_percent(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_duration_mins() {
        let d = Duration::from_secs(125);
        assert_eq!(format_duration(d), "2m 5s");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(17, 50), "34.0%");
        assert_eq!(format_percent(0, 0), "0.0%");
    }

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "station", "stations"), "1 station");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(5, "row", "rows"), "5 rows");
    }
}
