use crate::error::{FbmgError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Dependency class of a script file, recognized by filename substring.
///
/// Classes execute in ascending rank so that referenced objects exist before
/// their dependents: domains before the tables typed by them, tables before
/// the procedures and triggers reading them. This is a naming-convention
/// heuristic, not a dependency graph; a foreign key crossing class
/// boundaries in an unexpected direction is not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScriptClass {
    Domains,
    Tables,
    Procedures,
    Triggers,
    Other,
}

impl ScriptClass {
    /// Classify a file by its name. The header file is handled separately by
    /// [`scan_scripts_dir`] and never reaches this ranking.
    pub fn classify(file_name: &str) -> ScriptClass {
        let lowered = file_name.to_lowercase();
        if lowered.contains("domain") {
            ScriptClass::Domains
        } else if lowered.contains("table") {
            ScriptClass::Tables
        } else if lowered.contains("procedure") {
            ScriptClass::Procedures
        } else if lowered.contains("trigger") {
            ScriptClass::Triggers
        } else {
            ScriptClass::Other
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            ScriptClass::Domains => 0,
            ScriptClass::Tables => 1,
            ScriptClass::Procedures => 2,
            ScriptClass::Triggers => 3,
            ScriptClass::Other => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScriptFile {
    pub path: PathBuf,
    pub name: String,
    pub class: ScriptClass,
}

impl ScriptFile {
    pub fn read_content(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|source| FbmgError::FileRead {
            path: self.path.clone(),
            message: source.to_string(),
            source,
        })
    }
}

/// The classified contents of a scripts directory: the header file, if any,
/// and the remaining scripts in execution order.
#[derive(Debug, Clone)]
pub struct ScriptSet {
    pub header: Option<ScriptFile>,
    pub scripts: Vec<ScriptFile>,
}

fn is_header_file(file_name: &str) -> bool {
    file_name.to_lowercase().contains("header")
}

/// Scan a directory for `.sql` scripts, split off the header file and order
/// the rest by dependency class, ties broken by filename.
pub fn scan_scripts_dir(dir: &Path) -> Result<ScriptSet> {
    if !dir.is_dir() {
        return Err(FbmgError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut header = None;
    let mut scripts = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("sql") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(String::from) else {
            continue;
        };

        if is_header_file(&name) {
            header = Some(ScriptFile {
                class: ScriptClass::Other,
                path,
                name,
            });
        } else {
            scripts.push(ScriptFile {
                class: ScriptClass::classify(&name),
                path,
                name,
            });
        }
    }

    scripts.sort_by(|a, b| {
        a.class
            .rank()
            .cmp(&b.class.rank())
            .then_with(|| a.name.cmp(&b.name))
    });

    Ok(ScriptSet { header, scripts })
}
