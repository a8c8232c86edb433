use serde::Serialize;
use std::path::PathBuf;

/// Database-level facts needed to create or identify a database.
///
/// Produced once per database, either by catalog introspection or by parsing
/// the header script; immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub dialect: u8,
    pub charset: String,
    pub db_file_directory: String,
    pub db_file_name: String,
    pub page_size: u32,
    pub user: String,
    pub password: String,
}

impl Header {
    pub fn db_file_path(&self) -> PathBuf {
        PathBuf::from(&self.db_file_directory).join(&self.db_file_name)
    }
}

/// A named, reusable column type definition.
///
/// `default` and `check` hold the expression text with the leading `DEFAULT`
/// / `CHECK` keyword stripped; the renderer re-adds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Domain {
    pub name: String,
    pub base_type: String,
    pub default: Option<String>,
    pub not_null: bool,
    pub check: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub name: String,
    /// Columns in physical position order.
    pub columns: Vec<Column>,
    /// Fully rendered constraint definitions (UNIQUE / FOREIGN KEY / CHECK).
    /// Primary keys are not listed here; they are inline on the columns.
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    /// Either a user domain name or a synthesized SQL type string.
    pub type_or_domain: String,
    pub primary_key: bool,
    pub not_null: bool,
    /// Default expression with the leading `DEFAULT` keyword stripped.
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Procedure {
    pub name: String,
    pub inputs: Vec<Parameter>,
    pub outputs: Vec<Parameter>,
    /// Executable body text, stored verbatim and never parsed.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub type_or_domain: String,
}
