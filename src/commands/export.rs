use crate::catalog::{
    extract_domains, extract_header, extract_procedures, extract_tables, CatalogPort,
};
use crate::db::ConnectParams;
use crate::error::{FbmgError, Result};
use crate::render::RendererRegistry;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug)]
pub struct ExportResult {
    /// Extension of the format actually used (after any fallback).
    pub format: String,
    pub files_written: Vec<PathBuf>,
}

/// Regenerate schema scripts from a live database's catalog.
///
/// One output file per entity kind, named by kind and format extension;
/// entity kinds with nothing to render produce no file. An unknown format
/// identifier degrades to the built-in SQL format rather than failing the
/// export.
pub fn execute_export<C: CatalogPort>(
    catalog: &mut C,
    params: &ConnectParams,
    output_dir: &Path,
    format: &str,
) -> Result<ExportResult> {
    let registry = RendererRegistry::builtin();
    let renderer = registry.get_or_default(format);
    let extension = renderer.extension();

    fs::create_dir_all(output_dir).map_err(|source| FbmgError::FileWrite {
        path: output_dir.to_path_buf(),
        message: source.to_string(),
        source,
    })?;

    let mut files_written = Vec::new();
    let mut write = |name: &str, content: String| -> Result<()> {
        let path = output_dir.join(format!("{}.{}", name, extension));
        fs::write(&path, content).map_err(|source| FbmgError::FileWrite {
            path: path.clone(),
            message: source.to_string(),
            source,
        })?;
        files_written.push(path);
        Ok(())
    };

    // Each entity kind is extracted and written independently; a failure in
    // a later kind propagates without discarding files already written.
    if let Some(header) = extract_header(catalog, params)? {
        write("header", renderer.render_header(&header))?;
    }
    let domains = extract_domains(catalog)?;
    if !domains.is_empty() {
        write("domains", renderer.render_domains(&domains))?;
    }
    let tables = extract_tables(catalog)?;
    if !tables.is_empty() {
        write("tables", renderer.render_tables(&tables))?;
    }
    let procedures = extract_procedures(catalog)?;
    if !procedures.is_empty() {
        write("procedures", renderer.render_procedures(&procedures))?;
    }

    info!(
        count = files_written.len(),
        format = extension,
        dir = %output_dir.display(),
        "exported schema scripts"
    );
    Ok(ExportResult {
        format: extension.to_string(),
        files_written,
    })
}

#[cfg(feature = "cli")]
pub fn print_export_summary(result: &ExportResult) {
    use owo_colors::OwoColorize;

    if result.files_written.is_empty() {
        println!("{} No user-defined objects to export", "⚠".yellow());
        return;
    }
    for path in &result.files_written {
        println!(
            "  {} Wrote {}",
            "✓".green().bold(),
            path.display().to_string().cyan()
        );
    }
    println!(
        "{} Exported {} files in {} format",
        "✓".green().bold(),
        result.files_written.len().to_string().yellow(),
        result.format.cyan()
    );
}
