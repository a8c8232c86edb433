pub mod connection;
#[cfg(feature = "firebird")]
pub mod firebird;

pub use connection::ConnectParams;

use crate::error::Result;
use std::path::PathBuf;

/// Statement execution capability of an open database connection.
///
/// The connection is owned exclusively by the executing workflow for its
/// whole duration; nothing here is safe for concurrent use.
pub trait StatementExecutor {
    fn execute_statement(&mut self, sql: &str) -> Result<()>;
}

/// Parameters for the single create-empty-database call of the build
/// workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabaseOptions {
    pub path: PathBuf,
    pub user: String,
    pub password: String,
    pub page_size: u32,
    pub charset: String,
    pub overwrite: bool,
}

/// Factory for database connections, abstracting the engine so workflows are
/// testable against a fake.
pub trait DatabaseProvider {
    type Database: StatementExecutor + crate::catalog::CatalogPort;

    /// Create an empty database and return an open connection to it.
    fn create_database(&self, options: &CreateDatabaseOptions) -> Result<Self::Database>;
}
