use std::fmt;

/// Outcome of executing one script file: warnings and errors accumulated
/// over its statements. A file with no errors is reported OK.
#[derive(Debug, Clone, Default)]
pub struct FileOutcome {
    pub name: String,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl FileOutcome {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Aggregated result of a synchronization run, rendered as a single
/// human-readable text block with one section per processed file.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub title: String,
    /// Free-standing status lines preceding the file sections, such as the
    /// database-creation confirmation of the build workflow.
    pub notes: Vec<String>,
    pub files: Vec<FileOutcome>,
}

impl SyncReport {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn note(&mut self, line: impl Into<String>) {
        self.notes.push(line.into());
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.files.push(outcome);
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|f| !f.is_ok())
    }

    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|f| f.warnings.len()).sum()
    }

    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.errors.len()).sum()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-- {} --", self.title)?;
        for note in &self.notes {
            writeln!(f, "{}", note)?;
        }
        for file in &self.files {
            if file.is_ok() {
                write!(f, "OK: {}", file.name)?;
            } else {
                write!(f, "ERROR: {}", file.name)?;
            }
            for warning in &file.warnings {
                write!(f, "\n - WARNING: {}", warning)?;
            }
            for error in &file.errors {
                write!(f, "\n - {}", error)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
