use crate::db::{CreateDatabaseOptions, DatabaseProvider};
use crate::error::{FbmgError, Result};
use crate::script::{parse_header_facts, rewrite_database_path, scan_scripts_dir};
use crate::sync::{run_scripts, SyncMode, SyncReport};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of a freshly built database inside the target directory.
pub const DATABASE_FILE_NAME: &str = "database.fdb";

#[derive(Debug)]
pub struct BuildResult {
    pub database_path: PathBuf,
    pub report: SyncReport,
}

/// Build a fresh database from a scripts directory.
///
/// The header script is consumed first: its declared credentials, page size
/// and character set parameterize a single create-empty-database call, with
/// its `CREATE DATABASE` path argument rewritten to the target directory.
/// A missing header or a failed creation aborts the whole build; after a
/// successful creation the remaining scripts run in dependency order with
/// per-statement fault isolation.
pub fn execute_build<P: DatabaseProvider>(
    provider: &P,
    db_dir: &Path,
    scripts_dir: &Path,
) -> Result<BuildResult> {
    let set = scan_scripts_dir(scripts_dir)?;
    let header = set
        .header
        .ok_or_else(|| FbmgError::MissingHeader(scripts_dir.join("header.sql")))?;

    let database_path = db_dir.join(DATABASE_FILE_NAME);
    let header_script = rewrite_database_path(&header.read_content()?, &database_path);
    let facts = parse_header_facts(&header_script);

    info!(
        path = %database_path.display(),
        page_size = facts.page_size,
        charset = %facts.charset,
        "creating empty database"
    );
    let mut db = provider.create_database(&CreateDatabaseOptions {
        path: database_path.clone(),
        user: facts.user,
        password: facts.password,
        page_size: facts.page_size,
        charset: facts.charset,
        overwrite: true,
    })?;

    let mut report = SyncReport::new("Build Database Report");
    report.note("OK: empty database created");

    run_scripts(&mut db, &set.scripts, SyncMode::Build, &mut report);

    Ok(BuildResult {
        database_path,
        report,
    })
}

#[cfg(feature = "cli")]
pub fn print_build_summary(result: &BuildResult) {
    use owo_colors::OwoColorize;

    println!("{}", result.report);
    if result.report.has_errors() {
        println!(
            "{} Database built at {} with {} errors",
            "✗".red().bold(),
            result.database_path.display().to_string().cyan(),
            result.report.error_count().to_string().yellow()
        );
    } else {
        println!(
            "{} Database built at {}",
            "✓".green().bold(),
            result.database_path.display().to_string().cyan()
        );
    }
}
