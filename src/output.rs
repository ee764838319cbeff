//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each article leads
//! with its positional index, date, and title; the source file and the
//! written page follow as indented context lines. The inventory reads like a
//! table of contents while still tracing every entry back to a file.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Articles
//! 001 2021-11-20 Second Thoughts
//!     Source: 2021-11-20-second-thoughts.md
//!     URL: /2021/11/20/second-thoughts.html
//!     Tags: rust, meta
//! 004 ---------- not a date name
//!     Source: not-a-date-name.md
//!
//! Tags
//!     (untagged) 1 post
//!     rust 1 post
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 Second Thoughts → articles/2021/11/20/second-thoughts.html
//!
//! Pages
//!     index.html
//!
//! Built 4 articles, 2 pages
//! ```
//!
//! Failures are listed last, one per line, marked with `⍨`.
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::collect::{Collection, UNTAGGED};
use crate::pipeline::{ArticleRecord, BuildReport, Failure};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Date column: ISO date, or a dash placeholder of the same width.
fn date_column(record: &ArticleRecord) -> String {
    match record.date {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => "-".repeat(10),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Show `path` relative to `root` when possible.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
        .replace('\\', "/")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

fn format_failures(failures: &[Failure]) -> Vec<String> {
    let mut lines = Vec::new();
    if failures.is_empty() {
        return lines;
    }
    lines.push(String::new());
    lines.push("Failures".to_string());
    for failure in failures {
        lines.push(format!(
            "    \u{2368} {} ({}): {}",
            file_name(&failure.path),
            failure.stage,
            failure.message
        ));
    }
    lines
}

// ============================================================================
// check
// ============================================================================

/// Format the article inventory of a run that wrote nothing.
pub fn format_check_output(report: &BuildReport) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];

    for (i, record) in report.articles.iter().enumerate() {
        lines.push(format!(
            "{} {} {}",
            format_index(i + 1),
            date_column(record),
            record.title
        ));
        lines.push(format!("    Source: {}", file_name(&record.source)));
        if let Some(url) = &record.url {
            lines.push(format!("    URL: {url}"));
        }
        match &record.tags {
            Some(tags) if !tags.is_empty() => lines.push(format!("    Tags: {}", tags.join(", "))),
            _ => {}
        }
    }

    lines.extend(format_tags(&report.collection));
    lines.extend(format_failures(&report.failures));
    lines
}

fn format_tags(collection: &Collection) -> Vec<String> {
    let mut lines = Vec::new();
    if collection.tags.is_empty() {
        return lines;
    }
    lines.push(String::new());
    lines.push("Tags".to_string());
    for tag in &collection.tags {
        let label = if tag == UNTAGGED { "(untagged)" } else { tag };
        let count = collection.posts_tagged(tag).count();
        lines.push(format!("    {label} {}", plural(count, "post", "posts")));
    }
    lines
}

/// Print check output to stdout.
pub fn print_check_output(report: &BuildReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// build / articles
// ============================================================================

/// Format the pages a run wrote, relative to the output root.
pub fn format_build_output(report: &BuildReport, output_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, record) in report.articles.iter().enumerate() {
        let header = format!("{} {}", format_index(i + 1), record.title);
        match &record.output {
            Some(written) => lines.push(format!(
                "{header} \u{2192} {}",
                relative(written, output_root)
            )),
            None => lines.push(header),
        }
    }

    if !report.pages.is_empty() {
        lines.push(String::new());
        lines.push("Pages".to_string());
        for page in &report.pages {
            lines.push(format!("    {}", relative(page, output_root)));
        }
    }

    lines.extend(format_failures(&report.failures));

    lines.push(String::new());
    let mut summary = format!(
        "Built {}",
        plural(report.articles.len(), "article", "articles")
    );
    if !report.pages.is_empty() {
        summary.push_str(&format!(", {}", plural(report.pages.len(), "page", "pages")));
    }
    if !report.failures.is_empty() {
        summary.push_str(&format!(
            ", {}",
            plural(report.failures.len(), "failure", "failures")
        ));
    }
    lines.push(summary);
    lines
}

/// Print build output to stdout.
pub fn print_build_output(report: &BuildReport, output_root: &Path) {
    for line in format_build_output(report, output_root) {
        println!("{}", line);
    }
}
