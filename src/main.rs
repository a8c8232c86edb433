use fbmg::cli::{Cli, Commands};
use fbmg::config::FbmgConfig;
use fbmg::error::{format_error_chain, suggest_fix, FbmgError, Result};
use fbmg::logging;
use std::path::Path;

fn main() {
    let cli = Cli::parse_args();

    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("Failed to initialize logging: {}", err);
    }

    if let Err(err) = run(cli) {
        logging::output::error(format_error_chain(&err));
        if let Some(suggestion) = suggest_fix(&err) {
            logging::output::info(suggestion);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_file = FbmgConfig::load_from_file()?;

    match cli.command {
        Commands::Init => {
            let path = FbmgConfig::write_sample_config()?;
            logging::output::success(format!("Wrote {}", path.display()));
            Ok(())
        }

        Commands::BuildDb {
            db_dir,
            scripts_dir,
        } => {
            let config =
                FbmgConfig::merge_with_cli(config_file, None, scripts_dir, db_dir, None, None);
            let db_dir = config
                .db_dir
                .ok_or_else(|| FbmgError::Configuration("missing required --db-dir".to_string()))?;
            let scripts_dir = config.scripts_dir.ok_or_else(|| {
                FbmgError::Configuration("missing required --scripts-dir".to_string())
            })?;
            build(&db_dir, &scripts_dir)
        }

        Commands::ExportScripts {
            connection_string,
            output_dir,
            format,
        } => {
            let config = FbmgConfig::merge_with_cli(
                config_file,
                connection_string,
                None,
                None,
                output_dir,
                format,
            );
            let url = config.connection_string.ok_or_else(|| {
                FbmgError::Configuration("missing required --connection-string".to_string())
            })?;
            let output_dir = config.output_dir.ok_or_else(|| {
                FbmgError::Configuration("missing required --output-dir".to_string())
            })?;
            let format = config
                .format
                .unwrap_or_else(|| fbmg::render::DEFAULT_FORMAT.to_string());
            export(&url, &output_dir, &format)
        }

        Commands::UpdateDb {
            connection_string,
            scripts_dir,
        } => {
            let config = FbmgConfig::merge_with_cli(
                config_file,
                connection_string,
                scripts_dir,
                None,
                None,
                None,
            );
            let url = config.connection_string.ok_or_else(|| {
                FbmgError::Configuration("missing required --connection-string".to_string())
            })?;
            let scripts_dir = config.scripts_dir.ok_or_else(|| {
                FbmgError::Configuration("missing required --scripts-dir".to_string())
            })?;
            update(&url, &scripts_dir)
        }
    }
}

#[cfg(feature = "firebird")]
fn build(db_dir: &Path, scripts_dir: &Path) -> Result<()> {
    let provider = fbmg::db::firebird::FirebirdProvider::default();
    let result = fbmg::commands::execute_build(&provider, db_dir, scripts_dir)?;
    fbmg::commands::print_build_summary(&result);
    Ok(())
}

#[cfg(feature = "firebird")]
fn export(url: &str, output_dir: &Path, format: &str) -> Result<()> {
    let params = fbmg::db::ConnectParams::from_url(url)?;
    let mut db = fbmg::db::firebird::connect(&params)?;
    let result = fbmg::commands::execute_export(&mut db, &params, output_dir, format)?;
    fbmg::commands::print_export_summary(&result);
    Ok(())
}

#[cfg(feature = "firebird")]
fn update(url: &str, scripts_dir: &Path) -> Result<()> {
    let params = fbmg::db::ConnectParams::from_url(url)?;
    let mut db = fbmg::db::firebird::connect(&params)?;
    let result = fbmg::commands::execute_update(&mut db, scripts_dir)?;
    fbmg::commands::print_update_summary(&result);
    Ok(())
}

#[cfg(not(feature = "firebird"))]
fn engine_support_missing() -> FbmgError {
    FbmgError::Configuration(
        "this build of fbmg has no engine support; reinstall with --features firebird".to_string(),
    )
}

#[cfg(not(feature = "firebird"))]
fn build(_db_dir: &Path, _scripts_dir: &Path) -> Result<()> {
    Err(engine_support_missing())
}

#[cfg(not(feature = "firebird"))]
fn export(_url: &str, _output_dir: &Path, _format: &str) -> Result<()> {
    Err(engine_support_missing())
}

#[cfg(not(feature = "firebird"))]
fn update(_url: &str, _scripts_dir: &Path) -> Result<()> {
    Err(engine_support_missing())
}
