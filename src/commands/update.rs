use crate::catalog::CatalogPort;
use crate::db::StatementExecutor;
use crate::error::Result;
use crate::script::scan_scripts_dir;
use crate::sync::{run_scripts, SyncMode, SyncReport};
use std::path::Path;

#[derive(Debug)]
pub struct UpdateResult {
    pub report: SyncReport,
}

/// Reapply a scripts directory onto an existing, populated database.
///
/// Scripts run in dependency order with idempotent rewriting enabled:
/// procedures and triggers are redefined in place, while domains and tables
/// that already exist are skipped with a warning instead of failing. The
/// header script never takes part in this pass.
pub fn execute_update<D>(db: &mut D, scripts_dir: &Path) -> Result<UpdateResult>
where
    D: StatementExecutor + CatalogPort,
{
    let set = scan_scripts_dir(scripts_dir)?;

    let mut report = SyncReport::new("Update Database Report");
    run_scripts(db, &set.scripts, SyncMode::Update, &mut report);

    Ok(UpdateResult { report })
}

#[cfg(feature = "cli")]
pub fn print_update_summary(result: &UpdateResult) {
    use owo_colors::OwoColorize;

    println!("{}", result.report);
    let warnings = result.report.warning_count();
    if result.report.has_errors() {
        println!(
            "{} Update finished with {} errors, {} warnings",
            "✗".red().bold(),
            result.report.error_count().to_string().yellow(),
            warnings.to_string().yellow()
        );
    } else {
        println!(
            "{} Update finished, {} warnings",
            "✓".green().bold(),
            warnings.to_string().yellow()
        );
    }
}
