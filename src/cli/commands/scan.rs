use anyhow::Result;

use super::{CommandResult, CommandSummary, ScanSummary};
use crate::cli::args::ScanArgs;
use crate::core::AnalysisContext;

/// Analyze sources only; no catalog is read. Fails on hardcoded text or
/// files that could not be parsed.
pub fn scan(args: ScanArgs) -> Result<CommandResult> {
    let ctx = AnalysisContext::new(&args.common)?;
    let output = ctx.scan();

    let summary = ScanSummary {
        issues: output.issues.clone(),
        dynamic_namespace_count: output.dynamic_namespace_count,
    };
    let failed = output.hardcoded().next().is_some() || !output.parse_errors.is_empty();

    Ok(CommandResult {
        summary: CommandSummary::Scan(summary),
        source_files_checked: output.files_scanned,
        locale_files_checked: 0,
        parse_errors: output.parse_errors.clone(),
        catalog_warnings: Vec::new(),
        failed,
    })
}
