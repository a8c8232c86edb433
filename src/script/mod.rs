pub mod files;
pub mod header;
pub mod splitter;

pub use files::{scan_scripts_dir, ScriptClass, ScriptFile, ScriptSet};
pub use header::{parse_header_facts, rewrite_database_path, HeaderFacts};
pub use splitter::{split_script, SplitScript, SqlStatement, DEFAULT_TERMINATOR};
