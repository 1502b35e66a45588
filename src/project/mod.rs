//! Procedure folder discovery and file reading

mod discovery;
mod reader;

pub use discovery::{discover_procedure_files, relative_label, DiscoveryOptions};
pub use reader::{load_sources, read_sql_source};
