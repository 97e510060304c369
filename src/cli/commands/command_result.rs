use crate::cli::exit_status::ExitStatus;
use crate::core::compare::SyncMetrics;
use crate::core::parsers::json::MessageScanWarning;
use crate::issues::{Issue, ParseErrorIssue};
use crate::rules::{HealthReport, I18nDiagnostic};

#[derive(Debug)]
pub struct ScanSummary {
    /// Sorted by (file, line, column).
    pub issues: Vec<Issue>,
    pub dynamic_namespace_count: usize,
}

impl ScanSummary {
    pub fn hardcoded_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_hardcoded()).count()
    }
}

#[derive(Debug)]
pub struct SyncSummary {
    pub metrics: SyncMetrics,
    pub source_locale: String,
    pub catalog_source: String,
    pub dynamic_namespace_count: usize,
}

#[derive(Debug)]
pub struct HealthSummary {
    pub diagnostics: Vec<I18nDiagnostic>,
    pub report: HealthReport,
    pub source_locale: String,
    pub target_locales: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Sync(SyncSummary),
    Health(HealthSummary),
    Init(InitSummary),
}

/// Result of running a keysync command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Source files analyzed (parse failures excluded).
    pub source_files_checked: usize,
    /// Locale trees loaded from the catalog. 0 when no catalog was read.
    pub locale_files_checked: usize,
    pub parse_errors: Vec<ParseErrorIssue>,
    pub catalog_warnings: Vec<MessageScanWarning>,
    /// The command found something the user must act on.
    pub failed: bool,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        ExitStatus::from_findings(self.failed)
    }
}
