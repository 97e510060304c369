use anyhow::Result;

use super::{CommandResult, CommandSummary, SyncSummary};
use crate::cli::args::SyncArgs;
use crate::core::AnalysisContext;

/// Compare code keys with the source-locale catalog. Fails when code uses
/// keys the catalog does not define.
pub fn sync(args: SyncArgs) -> Result<CommandResult> {
    let ctx = AnalysisContext::new(&args.common)?;
    let catalog = ctx.load_catalog()?;
    let metrics = ctx.sync(&catalog)?;
    let scan = ctx.scan();

    let failed = metrics.missing_count() > 0 || !scan.parse_errors.is_empty();

    Ok(CommandResult {
        summary: CommandSummary::Sync(SyncSummary {
            metrics,
            source_locale: ctx.config.source_locale.clone(),
            catalog_source: catalog.source.clone(),
            dynamic_namespace_count: scan.dynamic_namespace_count,
        }),
        source_files_checked: scan.files_scanned,
        locale_files_checked: catalog.locales.len(),
        parse_errors: scan.parse_errors.clone(),
        catalog_warnings: catalog.warnings,
        failed,
    })
}
