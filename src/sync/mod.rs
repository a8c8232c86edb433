pub mod executor;
pub mod report;

pub use executor::{creation_target, rewrite_redefinable, run_script_text, run_scripts, SyncMode};
pub use report::{FileOutcome, SyncReport};
