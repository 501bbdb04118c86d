//! Shared CLI output helpers for consistent terminal output.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings, matched spans
//! - Cyan: paths, site names, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info

use std::fmt::Display;

use console::{style, StyledObject};

const RULE_WIDTH: usize = 56;

/// Mask printed in place of sensitive values.
pub const MASK: &str = "*****";

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn paint<D: Display>(styled: StyledObject<D>) -> String {
    if colors_enabled() {
        styled.to_string()
    } else {
        styled.force_styling(false).to_string()
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ added github.com`
pub fn success(msg: &str) {
    println!("{} {}", paint(style("✓").green()), msg);
}

/// Print an error message to stderr (red).
///
/// Example: `✗ site not found: github.com`
pub fn error(msg: &str) {
    eprintln!("{} {}", paint(style("✗").red()), msg);
}

/// Print a warning message to stderr (yellow).
pub fn warn(msg: &str) {
    eprintln!("{} {}", paint(style("⚠").yellow()), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: credkeep profile new`
pub fn hint(msg: &str) {
    eprintln!("{} {}", paint(style("→").cyan()), paint(style(msg).cyan()));
}

/// Print a bold header.
pub fn header(title: &str) {
    println!("{}", paint(style(title).bold()));
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  username  alice`
pub fn kv(label: &str, value: impl Display) {
    println!(
        "  {}  {}",
        paint(style(label).dim()),
        paint(style(value.to_string()).bold())
    );
}

/// Print a horizontal rule separator.
pub fn rule() {
    println!("{}", paint(style("─".repeat(RULE_WIDTH)).dim()));
}

/// Print a dimmed/secondary message.
///
/// Example: `no sites stored`
pub fn dimmed(msg: &str) {
    println!("{}", paint(style(msg).dim()));
}

/// Print an empty line.
pub fn blank() {
    println!();
}

/// Print raw data with no decoration (JSON, scripts).
pub fn data(text: &str) {
    println!("{}", text);
}

/// Format a path in cyan.
pub fn path(p: impl Display) -> String {
    paint(style(p.to_string()).cyan())
}

/// Format a site or profile name in cyan.
pub fn name(n: &str) -> String {
    paint(style(n).cyan())
}

/// Format a count in bold.
pub fn count(n: usize) -> String {
    paint(style(n).bold())
}

/// Format a name with its matched span highlighted.
pub fn highlight(prefix: &str, matched: &str, suffix: &str) -> String {
    format!(
        "{}{}{}",
        prefix,
        paint(style(matched).yellow().bold()),
        suffix
    )
}

/// Format a tag list as `[a, b]`, dimmed.
pub fn tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    paint(style(format!("[{}]", tags.join(", "))).dim())
}
