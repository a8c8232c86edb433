//! fbmg synchronizes the schema of a Firebird database with a directory of
//! human-editable DDL scripts, in both directions: it can build a fresh
//! database from scripts, export scripts from a live catalog, and reapply
//! scripts onto an existing database without destroying what is already there.
//!
//! The crate is usable as a library; the `fbmg` binary (behind the `cli`
//! feature) is a thin wrapper over the workflow functions in [`commands`].
//! Talking to a real server requires the `firebird` feature, which pulls in
//! the pure-Rust wire client. Everything else (the schema model, the catalog
//! introspector, the renderers, the script splitter and the synchronization
//! executor) works against the narrow traits in [`catalog`] and [`db`], and
//! is tested against fakes.

pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod render;
pub mod script;
pub mod sync;

pub use catalog::{
    extract_domains, extract_header, extract_procedures, extract_tables, CatalogPort, ObjectKind,
};
pub use error::{FbmgError, Result};
pub use model::{Column, Domain, Header, Parameter, Procedure, Table};
pub use render::{Renderer, RendererRegistry, DEFAULT_FORMAT};
pub use script::{split_script, HeaderFacts, ScriptClass, SplitScript, SqlStatement};
pub use sync::{FileOutcome, SyncMode, SyncReport};
