//! Terminal output around the rendered changelog.
//!
//! Status lines go to stderr so that stdout carries only the changelog text
//! and can be piped into a file.

use console::style;

use crate::warning::PreviewWarning;

/// Print the command title, underlined.
pub fn display_title(title: &str) {
    eprintln!("\n{}", style(title).green().bold());
    eprintln!("{}\n", style("=".repeat(title.chars().count())).green().bold());
}

/// Print a dimmed comment line.
pub fn display_comment(message: &str) {
    eprintln!(" {}", style(format!("// {}", message)).dim());
}

/// Print the rendered changelog to stdout.
pub fn display_changelog(text: &str) {
    if text.is_empty() {
        return;
    }
    println!();
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("\n{} {}", style("✓").green().bold(), message);
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Display a preview warning to the user.
pub fn display_warning(warning: &PreviewWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}
