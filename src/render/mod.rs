pub mod json;
pub mod sql;

pub use json::JsonRenderer;
pub use sql::SqlRenderer;

use crate::model::{Domain, Header, Procedure, Table};
use std::collections::BTreeMap;

/// Name of the built-in format unknown format identifiers degrade to.
pub const DEFAULT_FORMAT: &str = "sql";

/// Serializes schema model entities into script text, one entry point per
/// entity kind. Implementations are pure and deterministic; output is
/// trimmed of trailing whitespace.
pub trait Renderer {
    /// File extension for output files of this format, without the dot.
    fn extension(&self) -> &'static str;

    fn render_header(&self, header: &Header) -> String;
    fn render_domains(&self, domains: &[Domain]) -> String;
    fn render_tables(&self, tables: &[Table]) -> String;
    fn render_procedures(&self, procedures: &[Procedure]) -> String;
}

type RendererConstructor = fn() -> Box<dyn Renderer>;

/// Open registry from format identifier to renderer constructor.
///
/// New output formats are added with [`register`](Self::register) without
/// touching extraction or the export workflow. Lookups for unregistered
/// names fall back to the SQL renderer as a returned value; the registry
/// itself is never mutated by a failed lookup.
pub struct RendererRegistry {
    formats: BTreeMap<String, RendererConstructor>,
}

impl RendererRegistry {
    /// Registry with the built-in `sql` and `json` formats.
    pub fn builtin() -> Self {
        let mut registry = Self {
            formats: BTreeMap::new(),
        };
        registry.register(DEFAULT_FORMAT, || Box::new(SqlRenderer));
        registry.register("json", || Box::new(JsonRenderer));
        registry
    }

    pub fn register(&mut self, name: &str, constructor: RendererConstructor) {
        self.formats.insert(normalize(name), constructor);
    }

    pub fn get(&self, name: &str) -> Option<Box<dyn Renderer>> {
        self.formats.get(&normalize(name)).map(|ctor| ctor())
    }

    /// Look up a format, degrading to the built-in SQL renderer when the
    /// name is not registered.
    pub fn get_or_default(&self, name: &str) -> Box<dyn Renderer> {
        self.get(name).unwrap_or_else(|| {
            tracing::warn!(format = name, "unknown output format, falling back to sql");
            Box::new(SqlRenderer)
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.formats.keys().map(String::as_str).collect()
    }
}

fn normalize(name: &str) -> String {
    name.trim().trim_start_matches('.').to_lowercase()
}
