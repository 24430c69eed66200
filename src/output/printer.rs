//! Terminal output helpers
//!
//! Color is dropped when `NO_COLOR` is set. Warnings go to stderr, the rest
//! of the report to stdout.

const HEADER_WIDTH: usize = 59;

/// Line prefix in both renderings
#[derive(Clone, Copy)]
enum Marker {
    Success,
    Failure,
    Warning,
    Info,
}

impl Marker {
    fn colored(self) -> &'static str {
        match self {
            Marker::Success => "\x1b[32m✓\x1b[0m",
            Marker::Failure => "\x1b[31m✗\x1b[0m",
            Marker::Warning => "\x1b[33mWarning:\x1b[0m",
            Marker::Info => "\x1b[34mℹ\x1b[0m",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Marker::Success => "OK:",
            Marker::Failure => "FAILED:",
            Marker::Warning => "Warning:",
            Marker::Info => "Info:",
        }
    }
}

fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

fn marked(marker: Marker, message: &str, color: bool) -> String {
    let prefix = if color {
        marker.colored()
    } else {
        marker.plain()
    };
    format!("{prefix} {message}")
}

pub fn print_success(message: &str) {
    println!("{}", marked(Marker::Success, message, use_color()));
}

/// Report line for a file whose job rejected records
pub fn print_failure(message: &str) {
    println!("{}", marked(Marker::Failure, message, use_color()));
}

pub fn print_warning(message: &str) {
    eprintln!("{}", marked(Marker::Warning, message, use_color()));
}

pub fn print_info(message: &str) {
    println!("{}", marked(Marker::Info, message, use_color()));
}

/// Centered title between two rules
pub fn print_header(title: &str) {
    let rule = "═".repeat(HEADER_WIDTH);
    println!("\n{rule}\n{title:^width$}\n{rule}\n", width = HEADER_WIDTH);
}

/// Indented `key: value` line, key in bold when colored
pub fn print_key_value(key: &str, value: &str) {
    if use_color() {
        println!("  \x1b[1m{key}:\x1b[0m {value}");
    } else {
        println!("  {key}: {value}");
    }
}
