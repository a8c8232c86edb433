pub mod build;
pub mod export;
pub mod update;

pub use build::{execute_build, BuildResult, DATABASE_FILE_NAME};
pub use export::{execute_export, ExportResult};
pub use update::{execute_update, UpdateResult};

#[cfg(feature = "cli")]
pub use build::print_build_summary;
#[cfg(feature = "cli")]
pub use export::print_export_summary;
#[cfg(feature = "cli")]
pub use update::print_update_summary;
