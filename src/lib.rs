//! rust-procmap: static call-graph mapping for SQL Server stored procedures
//!
//! This library reads a folder of stored-procedure scripts, works out which
//! procedures each one runs through `EXEC`/`EXECUTE`, and renders the call
//! tree beneath a chosen procedure.

pub mod error;
pub mod graph;
pub mod model;
pub mod parser;
pub mod project;
mod util;

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

pub use error::ProcMapError;
pub use graph::TreeStyle;
pub use model::{MalformedPolicy, ProcedureCatalog};
pub use project::DiscoveryOptions;

/// Options for mapping a procedure call tree
#[derive(Debug, Clone)]
pub struct MapOptions {
    /// Folder to scan for procedure scripts
    pub root: PathBuf,
    /// Schema of the start procedure
    pub schema: String,
    /// Name of the start procedure
    pub procedure: String,
    /// Which files count as procedure sources
    pub discovery: DiscoveryOptions,
    /// Handling of files or call sites without a readable procedure name
    pub malformed: MalformedPolicy,
    /// Line formatting
    pub style: TreeStyle,
}

/// Result of a mapping run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOutcome {
    /// The tree was written; `lines` lines went to the sink
    Mapped { lines: usize },
    /// No procedure with the requested schema and name exists
    NotFound,
}

/// Maps call trees over one catalog
#[derive(Debug)]
pub struct ProcedureMapper {
    catalog: ProcedureCatalog,
    style: TreeStyle,
}

impl ProcedureMapper {
    pub fn new(catalog: ProcedureCatalog, style: TreeStyle) -> Self {
        Self { catalog, style }
    }

    pub fn catalog(&self) -> &ProcedureCatalog {
        &self.catalog
    }

    /// Write the call tree of `schema.start_name` to `sink`
    pub fn map<F>(&self, schema: &str, start_name: &str, sink: F) -> Result<MapOutcome>
    where
        F: FnMut(&str),
    {
        let Some(start) = self.catalog.lookup(start_name, schema)? else {
            info!(schema, procedure = start_name, "start procedure not found");
            return Ok(MapOutcome::NotFound);
        };

        let mut printer = graph::TreePrinter::new(&self.catalog, self.style.clone(), sink);
        let lines = printer.print(start)?;
        Ok(MapOutcome::Mapped { lines })
    }
}

/// Read and parse every procedure script under `root`
pub fn load_catalog(
    root: &std::path::Path,
    discovery: &DiscoveryOptions,
    malformed: MalformedPolicy,
) -> Result<ProcedureCatalog> {
    let sources = project::load_sources(root, discovery)?;
    info!(files = sources.len(), root = %root.display(), "read procedure sources");
    Ok(ProcedureCatalog::from_sources(sources, malformed)?)
}

/// Build the catalog for `options.root` and write the tree of the start procedure to `sink`
pub fn map_procedure<F>(options: &MapOptions, sink: F) -> Result<MapOutcome>
where
    F: FnMut(&str),
{
    let catalog = load_catalog(&options.root, &options.discovery, options.malformed)?;
    ProcedureMapper::new(catalog, options.style.clone()).map(&options.schema, &options.procedure, sink)
}
