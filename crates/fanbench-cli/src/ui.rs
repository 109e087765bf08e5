//! UI helpers for CLI display.

use console::{style, StyledObject};

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

fn header_line(text: &str, color: bool) -> String {
    let line = format!("=== {text} ===");
    if color {
        style(line).bold().cyan().to_string()
    } else {
        line
    }
}

fn tagged_line(tag: StyledObject<&str>, text: &str, color: bool) -> String {
    if color {
        format!("{} {text}", tag.bold())
    } else {
        format!("{} {text}", tag.force_styling(false))
    }
}

fn warning_line(text: &str, color: bool) -> String {
    tagged_line(style("[WARN]").yellow(), text, color)
}

fn error_line(text: &str, color: bool) -> String {
    tagged_line(style("[ERROR]").red(), text, color)
}

/// Print a styled scenario header.
pub fn print_header(text: &str) {
    println!("{}", header_line(text, !is_color_disabled()));
}

/// Print a warning to stderr.
pub fn print_warning(text: &str) {
    eprintln!("{}", warning_line(text, !is_color_disabled()));
}

/// Print an error message.
pub fn print_error(text: &str) {
    eprintln!("{}", error_line(text, !is_color_disabled()));
}
