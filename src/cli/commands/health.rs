use anyhow::Result;

use super::{CommandResult, CommandSummary, HealthSummary};
use crate::cli::args::HealthArgs;
use crate::core::AnalysisContext;

/// Score the catalog. Fails when the score is below the threshold
/// (`--threshold`, else `scoreThreshold`).
pub fn health(args: HealthArgs) -> Result<CommandResult> {
    let ctx = AnalysisContext::new(&args.common)?;
    let threshold = args.threshold.unwrap_or(ctx.config.score_threshold);

    let catalog = ctx.load_catalog()?;
    let metrics = ctx.sync(&catalog)?;
    let outcome = ctx.health(&catalog, &metrics, threshold);
    let scan = ctx.scan();

    Ok(CommandResult {
        failed: !outcome.report.passed,
        summary: CommandSummary::Health(HealthSummary {
            diagnostics: outcome.diagnostics,
            report: outcome.report,
            source_locale: ctx.config.source_locale.clone(),
            target_locales: outcome.target_locales,
        }),
        source_files_checked: scan.files_scanned,
        locale_files_checked: catalog.locales.len(),
        parse_errors: scan.parse_errors.clone(),
        catalog_warnings: catalog.warnings,
    })
}
