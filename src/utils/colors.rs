/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Greys out a missing value (`None`), otherwise returns it untouched.
///
/// Esempio:
/// `colorize_count(None)` → "<grey>--<reset>"
pub fn colorize_count(value: Option<i64>) -> String {
    match value {
        Some(n) => n.to_string(),
        None => format!("{GREY}--{RESET}"),
    }
}

/// Primary tables in yellow, cache tables in cyan.
pub fn color_for_role(is_cache: bool) -> &'static str {
    if is_cache { CYAN } else { YELLOW }
}
