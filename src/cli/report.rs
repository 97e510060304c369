//! Console output in cargo style.
//!
//! Results go to stdout; parse failures and catalog warnings go to stderr.
//! Everything is written through `Write` so output can be captured in tests.

use std::{
    collections::HashMap,
    fs,
    io::{self, Write},
};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, HealthSummary, InitSummary, ScanSummary, SyncSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::BindingKind;
use crate::core::compare::{BindingCounts, GroupedKeys};
use crate::issues::Issue;
use crate::rules::{Category, DiagnosticSeverity};

pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
    print_warnings_to(result, verbose, &mut io::stderr().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Scan(summary) => print_scan(summary, result, verbose, writer),
        CommandSummary::Sync(summary) => print_sync(summary, result, verbose, writer),
        CommandSummary::Health(summary) => print_health(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

pub fn print_warnings_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    for warning in &result.catalog_warnings {
        let _ = writeln!(
            writer,
            "{} {}: {}",
            "warning:".bold().yellow(),
            warning.file_path,
            warning.error
        );
    }

    // In verbose mode each failure was already printed while scanning.
    let count = result.parse_errors.len();
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

// ============================================================
// scan
// ============================================================

/// Lines of source files, read on first use.
#[derive(Default)]
struct SourceLines {
    files: HashMap<String, Option<Vec<String>>>,
}

impl SourceLines {
    fn line(&mut self, file_path: &str, line: usize) -> Option<&str> {
        let lines = self.files.entry(file_path.to_string()).or_insert_with(|| {
            fs::read_to_string(file_path)
                .ok()
                .map(|content| content.lines().map(str::to_string).collect())
        });
        lines.as_ref()?.get(line.checked_sub(1)?).map(String::as_str)
    }
}

fn print_hardcoded<W: Write>(issue: &Issue, lines: &mut SourceLines, writer: &mut W) {
    let loc = &issue.location;
    let gutter = loc.line.to_string().len();

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        "warning".bold().yellow(),
        issue.text,
        "hardcoded-text".dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), loc);

    if let Some(source_line) = lines.line(&loc.file_path, loc.line) {
        let prefix: String = source_line.chars().take(loc.col.saturating_sub(1)).collect();
        let _ = writeln!(writer, "{:>gutter$} {}", "", "|".blue());
        let _ = writeln!(
            writer,
            "{:>gutter$} {} {}",
            loc.line.to_string().blue(),
            "|".blue(),
            source_line
        );
        let _ = writeln!(
            writer,
            "{:>gutter$} {} {:>padding$}{}",
            "",
            "|".blue(),
            "",
            "^".yellow(),
            padding = UnicodeWidthStr::width(prefix.as_str())
        );
    }
    let _ = writeln!(writer);
}

fn print_key_usage<W: Write>(issue: &Issue, writer: &mut W) {
    let (key, kind) = match (issue.full_key(), issue.full_pattern()) {
        (Some(key), _) => (key, "key"),
        (None, Some(pattern)) => (pattern, "pattern"),
        (None, None) => return,
    };
    let binding = match issue.binding {
        BindingKind::Root => "root",
        BindingKind::Bound => "bound",
        BindingKind::Unknown => "unknown",
        BindingKind::Unbound => "unbound",
    };
    let _ = writeln!(
        writer,
        "{}: {} {}  {}",
        "info".bold().cyan(),
        kind,
        key,
        binding.dimmed()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.location);
}

fn print_binding_counts<W: Write>(counts: &BindingCounts, dynamic_namespaces: usize, writer: &mut W) {
    let _ = writeln!(
        writer,
        "Keys: {} (root {}, bound {}, unknown {}, unbound {}), dynamic namespaces: {}",
        counts.total(),
        counts.root,
        counts.bound,
        counts.unknown,
        counts.unbound,
        dynamic_namespaces
    );
}

fn print_scan<W: Write>(summary: &ScanSummary, result: &CommandResult, verbose: bool, writer: &mut W) {
    let mut lines = SourceLines::default();
    let mut counts = BindingCounts::default();

    for issue in &summary.issues {
        if issue.is_hardcoded() {
            print_hardcoded(issue, &mut lines, writer);
            continue;
        }
        if issue.key.is_none() {
            continue;
        }
        counts.record(issue.binding);
        if verbose {
            print_key_usage(issue, writer);
        }
    }

    print_binding_counts(&counts, summary.dynamic_namespace_count, writer);

    let files = result.source_files_checked;
    let hardcoded = summary.hardcoded_count();
    if hardcoded == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} source {} - no hardcoded text found",
                files,
                plural(files, "file", "files")
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} hardcoded {} in {} source {}",
            FAILURE_MARK.red(),
            hardcoded,
            plural(hardcoded, "string", "strings").yellow(),
            files,
            plural(files, "file", "files")
        );
    }
}

// ============================================================
// sync
// ============================================================

fn print_grouped<W: Write>(title: &str, grouped: &GroupedKeys, writer: &mut W) {
    let count: usize = grouped.values().map(Vec::len).sum();
    if count == 0 {
        return;
    }
    let _ = writeln!(writer, "{} ({}):", title.bold(), count);
    for (namespace, keys) in grouped {
        let label = if namespace.is_empty() { "(root)" } else { namespace };
        let _ = writeln!(writer, "  {}", label.cyan());
        for key in keys {
            let _ = writeln!(writer, "    {}", key);
        }
    }
    let _ = writeln!(writer);
}

fn print_sync<W: Write>(summary: &SyncSummary, result: &CommandResult, verbose: bool, writer: &mut W) {
    let metrics = &summary.metrics;
    let locale = &summary.source_locale;

    print_grouped(&format!("Missing in '{}'", locale), &metrics.missing, writer);
    print_grouped(&format!("Unused in '{}'", locale), &metrics.unused, writer);

    if !metrics.dynamic_review_required.is_empty() {
        let _ = writeln!(
            writer,
            "{} ({}):",
            "Needs review, reachable only through dynamic keys".bold(),
            metrics.dynamic_review_required.len()
        );
        for key in &metrics.dynamic_review_required {
            let _ = writeln!(writer, "    {}", key);
        }
        let _ = writeln!(writer);
    }

    if verbose && !metrics.ambiguous_matches.is_empty() {
        let _ = writeln!(writer, "{}:", "Ambiguous partial keys".bold());
        for (partial, leaves) in &metrics.ambiguous_matches {
            let _ = writeln!(writer, "    {} -> {}", partial, leaves.join(", "));
        }
        let _ = writeln!(writer);
    }

    let _ = writeln!(
        writer,
        "Coverage: {:.1}% of code keys defined, {:.1}% of catalog keys used",
        metrics.local_coverage, metrics.remote_coverage
    );
    print_binding_counts(
        &metrics.binding_counts,
        summary.dynamic_namespace_count,
        writer,
    );

    let missing = metrics.missing_count();
    let unused = metrics.unused_count();
    let files = result.source_files_checked;
    if missing == 0 && unused == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {} source {} against {} - catalog in sync",
                files,
                plural(files, "file", "files"),
                summary.catalog_source
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} missing, {} unused ({} source {}, catalog {})",
            FAILURE_MARK.red(),
            missing.to_string().red(),
            unused.to_string().yellow(),
            files,
            plural(files, "file", "files"),
            summary.catalog_source
        );
    }
}

// ============================================================
// health
// ============================================================

fn print_health<W: Write>(summary: &HealthSummary, writer: &mut W) {
    for diagnostic in &summary.diagnostics {
        let severity = match diagnostic.severity {
            DiagnosticSeverity::Error => "error".bold().red(),
            DiagnosticSeverity::Warning => "warning".bold().yellow(),
            DiagnosticSeverity::Info => "info".bold().cyan(),
        };
        let _ = writeln!(
            writer,
            "{}[{}]: {}",
            severity,
            diagnostic.rule,
            diagnostic.message
        );
        let _ = writeln!(
            writer,
            "  {} {} {}",
            "=".blue(),
            "help:".bold().cyan(),
            diagnostic.help
        );
    }
    if !summary.diagnostics.is_empty() {
        let _ = writeln!(writer);
    }

    let report = &summary.report;
    let targets = if summary.target_locales.is_empty() {
        "none".to_string()
    } else {
        summary.target_locales.join(", ")
    };
    let _ = writeln!(
        writer,
        "Locales: {} -> {}",
        summary.source_locale, targets
    );

    let label_width = Category::ALL
        .iter()
        .map(|c| UnicodeWidthStr::width(c.to_string().as_str()))
        .max()
        .unwrap_or(0);
    for (category, breakdown) in &report.categories {
        let _ = writeln!(
            writer,
            "  {:<label_width$}  {:>3}  ({} {}, {} {})",
            category.to_string(),
            breakdown.score,
            breakdown.errors,
            plural(breakdown.errors, "error", "errors"),
            breakdown.warnings,
            plural(breakdown.warnings, "warning", "warnings"),
        );
    }

    let errors = report.error_count();
    let warnings = report.warning_count();
    let score_line = format!(
        "Health score {}/100 (threshold {}) - {} {}, {} {}",
        report.score,
        report.threshold,
        errors,
        plural(errors, "error", "errors"),
        warnings,
        plural(warnings, "warning", "warnings")
    );
    if report.passed {
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), score_line.green());
    } else {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), score_line.red());
    }
}

// ============================================================
// init
// ============================================================

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else if let Some(error) = &summary.error {
        let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), error);
    }
}
