//! Procedure model: identities, records and the catalog

mod catalog;
mod elements;
mod record;

pub use catalog::{MalformedPolicy, ProcedureCatalog};
pub use elements::*;
pub use record::ProcedureRecord;
