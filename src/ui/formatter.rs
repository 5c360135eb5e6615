//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use console::style;

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Display the proposed version change.
pub fn display_proposed_version(old: &str, new: &str) {
    println!("\n{}", style("Proposed Version Change:").bold());
    println!("  From: {}", style(old).red());
    println!("  To:   {}", style(new).green());
}

/// Display the commit messages a changelog section is built from.
pub fn display_commit_summary(subjects: &[String], branch_name: &str) {
    print!("{}", format_commit_summary(subjects, branch_name));
}

/// Build the commit summary block.
///
/// Shows up to 10 subject lines, each cut to 60 characters; the rest are
/// summarized as a count.
pub fn format_commit_summary(subjects: &[String], branch_name: &str) -> String {
    let mut out = format!(
        "\n{}\n{}\n",
        style(format!("Collecting commits on branch '{}'", branch_name)).bold(),
        style(format!("{} new commits:", subjects.len())).underlined()
    );

    for (i, subject) in subjects.iter().take(10).enumerate() {
        let short: String = subject.chars().take(60).collect();
        out.push_str(&format!("  {}. {}\n", i + 1, short));
    }

    if subjects.len() > 10 {
        out.push_str(&format!("  ... and {} more commits\n", subjects.len() - 10));
    }
    out
}

/// Display text that would have been written in dry-run mode.
pub fn display_preview(title: &str, body: &str) {
    println!("\n{}", style(title).bold());
    for line in body.lines() {
        println!("  {}", style(line).dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("#File{}.cs", i)).collect()
    }

    #[test]
    fn test_commit_summary_lists_every_short_list_entry() {
        let out = format_commit_summary(&subjects(3), "development");
        assert!(out.contains("Collecting commits on branch 'development'"));
        assert!(out.contains("3 new commits:"));
        assert!(out.contains("  1. #File0.cs\n"));
        assert!(out.contains("  3. #File2.cs\n"));
        assert!(!out.contains("more commits"));
    }

    #[test]
    fn test_commit_summary_long_list() {
        let out = format_commit_summary(&subjects(12), "development");
        assert!(out.contains("12 new commits:"));
        assert!(out.contains("  10. #File9.cs\n"));
        assert!(!out.contains("#File10.cs"));
        assert!(out.ends_with("  ... and 2 more commits\n"));
    }

    #[test]
    fn test_commit_summary_truncates_long_subjects() {
        let long = vec!["x".repeat(80)];
        let out = format_commit_summary(&long, "development");
        assert!(out.contains(&format!("  1. {}\n", "x".repeat(60))));
        assert!(!out.contains(&"x".repeat(61)));
    }
}
