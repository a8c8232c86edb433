use std::path::PathBuf;
use thiserror::Error;

/// Main error type for fbmg.
///
/// Only workflow-aborting failures surface through this type; statement- and
/// file-level failures during synchronization are absorbed into the
/// [`crate::sync::SyncReport`] instead.
#[derive(Error, Debug)]
pub enum FbmgError {
    // Script file errors
    #[error("No header script found at {0}")]
    MissingHeader(PathBuf),

    #[error("Failed to read {path}: {message}")]
    FileRead {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {message}")]
    FileWrite {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    // Database errors
    #[error("Failed to create database: {0}")]
    DatabaseCreation(String),

    #[error("Failed to connect to database: {0}")]
    DatabaseConnection(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load configuration from {path}: {message}")]
    ConfigLoad { path: PathBuf, message: String },

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for FbmgError {
    fn from(err: std::io::Error) -> Self {
        FbmgError::Other(err.to_string())
    }
}

#[cfg(feature = "firebird")]
impl From<rsfbclient::FbError> for FbmgError {
    fn from(err: rsfbclient::FbError) -> Self {
        // The wire client reports connect failures and statement failures
        // through the same type; keep the message and classify by content.
        let message = err.to_string();
        if message.contains("connect") || message.contains("Connection") {
            FbmgError::DatabaseConnection(message)
        } else {
            FbmgError::Database(message)
        }
    }
}

/// Result type alias for fbmg operations
pub type Result<T> = std::result::Result<T, FbmgError>;

/// Helper trait for attaching the offending path to file errors
pub trait ErrorContext<T> {
    fn file_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<FbmgError>,
{
    fn file_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| {
            let mut err = e.into();
            match &mut err {
                FbmgError::FileRead { path: p, .. } => *p = path.into(),
                FbmgError::FileWrite { path: p, .. } => *p = path.into(),
                _ => {}
            }
            err
        })
    }
}

/// Helper function to format an error with all its causes
pub fn format_error_chain(err: &FbmgError) -> String {
    use std::error::Error;

    let mut output = format!("Error: {}", err);

    let mut current_err: &dyn Error = err;
    while let Some(source) = current_err.source() {
        output.push_str(&format!("\n  Caused by: {}", source));
        current_err = source;
    }

    output
}

/// Helper function to suggest fixes for common errors
pub fn suggest_fix(err: &FbmgError) -> Option<String> {
    match err {
        FbmgError::DatabaseConnection(_) => Some(
            "Suggestions:\n\
             - Check if the Firebird server is running\n\
             - Verify the connection string is correct\n\
             - Ensure the database file exists and the user has access to it"
                .to_string(),
        ),
        FbmgError::InvalidConnectionString(_) => Some(
            "Connection string should be in format:\n\
             firebird://[user[:password]@][host][:port]/path/to/database.fdb"
                .to_string(),
        ),
        FbmgError::MissingHeader(path) => Some(format!(
            "No header script at: {}\n\
             - The scripts directory must contain a header file (e.g. header.sql)\n\
             - The header declares the CREATE DATABASE statement and credentials",
            path.display()
        )),
        FbmgError::DirectoryNotFound(path) => Some(format!(
            "Directory not found: {}\n\
             - Check if the path is correct\n\
             - Ensure you're running fbmg from the right directory",
            path.display()
        )),
        _ => None,
    }
}
