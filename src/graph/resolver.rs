//! Resolution of call sites to catalogued procedures

use tracing::{trace, warn};

use crate::error::ProcMapError;
use crate::model::{MalformedPolicy, ProcedureCatalog, ProcedureRecord, Reference};

/// Turns a record's call sites into edges to other records in the catalog
#[derive(Debug, Clone, Copy)]
pub struct CallGraphResolver<'a> {
    catalog: &'a ProcedureCatalog,
}

impl<'a> CallGraphResolver<'a> {
    pub fn new(catalog: &'a ProcedureCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a ProcedureCatalog {
        self.catalog
    }

    /// Catalogued call targets of `record`, in call-site order.
    ///
    /// Call sites that name nothing in the catalog (system procedures, other
    /// databases, functions) are dropped without error.
    pub fn resolve(&self, record: &ProcedureRecord) -> Result<Vec<&'a ProcedureRecord>, ProcMapError> {
        self.resolve_references(record, record.references())
    }

    // The EXEC scanner never yields an empty name, so the malformed arms below
    // are only reached by references built outside it.
    fn resolve_references(
        &self,
        record: &ProcedureRecord,
        references: &[Reference],
    ) -> Result<Vec<&'a ProcedureRecord>, ProcMapError> {
        let mut edges = Vec::new();

        for reference in references {
            let identity = match reference.identity() {
                Ok(identity) => identity,
                Err(message) => match self.catalog.policy() {
                    MalformedPolicy::Strict => {
                        return Err(ProcMapError::MalformedReference {
                            source_label: record.source_label().to_string(),
                            reference: format!("{} ({})", reference, message),
                        })
                    }
                    MalformedPolicy::Skip => {
                        warn!(
                            source = record.source_label(),
                            %reference,
                            reason = message,
                            "skipping malformed EXEC reference"
                        );
                        continue;
                    }
                },
            };

            match self.catalog.lookup_identity(&identity)? {
                Some(target) => edges.push(target),
                None => trace!(
                    from = record.display_name(),
                    target = %identity,
                    "unresolved EXEC target"
                ),
            }
        }

        Ok(edges)
    }
}
