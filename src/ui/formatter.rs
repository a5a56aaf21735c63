//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from user interaction.

use crate::boundary::BoundaryWarning;
use crate::domain::ChangeList;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
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
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Frame a block of text, one line per row, for display before a question.
pub fn format_block(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let width = lines
        .iter()
        .map(|l| console::measure_text_width(l))
        .max()
        .unwrap_or(0);
    let rule = "─".repeat(width + 2);

    let mut block = format!("┌{}┐\n", rule);
    for line in lines {
        let pad = width - console::measure_text_width(line);
        block.push_str(&format!("│ {}{} │\n", line, " ".repeat(pad)));
    }
    block.push_str(&format!("└{}┘", rule));
    block
}

/// Display a summary of the collected changes, one line per change.
///
/// # Arguments
/// * `changes` - Changes going into the release
/// * `since` - Tag of the previous release, if any
pub fn display_change_summary(changes: &ChangeList, since: Option<&str>) {
    let header = match since {
        Some(tag) => format!("{} changes since {}", changes.len(), tag),
        None => format!("{} changes", changes.len()),
    };
    println!("\n{}", style(header).bold());

    for change in changes.iter() {
        println!(
            "  {} {}",
            style(format!("[{}]", change.change_type().code())).dim(),
            change.display_short().trim_start_matches("* ")
        );
    }
}

/// Display the URL of a submitted release.
pub fn display_release_url(url: &str) {
    println!(
        "\n{} Release created: {}\n",
        style("✓").green(),
        style(url).cyan().underlined()
    );
}
