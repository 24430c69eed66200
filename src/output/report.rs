//! Human-readable rendering of a finished import run

use crate::models::{FileResult, JobErrorRecord, RunStats};
use crate::output::{print_failure, print_header, print_info, print_key_value, print_success};

/// Print the outcome of every file followed by run totals
pub fn render_run(stats: &RunStats) {
    print_header("User Import");

    print_key_value("Connection", &connection_label(stats));
    print_key_value("Upsert", yes_no(stats.upsert));
    print_key_value("Completion email", yes_no(stats.notify_by_email));
    println!();

    if stats.files.is_empty() {
        print_info("No files were imported.");
        return;
    }

    for file in &stats.files {
        render_file(file);
    }

    println!();
    print_key_value("Files", &stats.files.len().to_string());
    print_key_value("Inserted", &stats.total_inserted().to_string());
    print_key_value("Updated", &stats.total_updated().to_string());
    print_key_value("Failed", &stats.total_failed().to_string());
    if let Some(duration) = stats.duration() {
        print_key_value("Elapsed", &format_elapsed(duration));
    }
    println!();

    if stats.has_errors() {
        print_info(&format!(
            "{} record(s) were rejected; see the errors above.",
            stats.error_count()
        ));
    } else {
        print_success("All records imported.");
    }
}

fn render_file(file: &FileResult) {
    let summary = file.result.summary_or_default();
    let line = format!(
        "{} [{}] inserted {}, updated {}, failed {}",
        file.name, file.result.status, summary.inserted, summary.updated, summary.failed
    );

    if file.errors.is_empty() {
        print_success(&line);
        return;
    }

    print_failure(&line);
    for record in &file.errors {
        println!("      {}", describe_error(record));
    }
}

/// One-line description of a rejected record
pub fn describe_error(record: &JobErrorRecord) -> String {
    let who = record.user_email().unwrap_or("<unknown user>");
    let reasons: Vec<String> = record
        .errors
        .iter()
        .map(|e| match &e.path {
            Some(path) => format!("{} ({}: {})", e.message, e.code, path),
            None => format!("{} ({})", e.message, e.code),
        })
        .collect();

    if reasons.is_empty() {
        who.to_string()
    } else {
        format!("{}: {}", who, reasons.join("; "))
    }
}

fn connection_label(stats: &RunStats) -> String {
    match &stats.connection_id {
        Some(id) => format!("{} ({})", stats.connection, id),
        None => stats.connection.clone(),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn format_elapsed(duration: chrono::Duration) -> String {
    let secs = duration.num_seconds().max(0);
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}.{:03}s", secs, duration.num_milliseconds().max(0) % 1000)
    }
}
