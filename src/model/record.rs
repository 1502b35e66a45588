//! A single parsed stored procedure

use once_cell::sync::OnceCell;

use super::{ProcedureIdentity, Reference, SqlSource};
use crate::error::ProcMapError;
use crate::parser::{extract_exec_references, parse_procedure_declaration};

/// One procedure's identity and source text.
///
/// Records never point at each other; call targets are looked up through the
/// catalog by identity.
#[derive(Debug)]
pub struct ProcedureRecord {
    identity: ProcedureIdentity,
    display_name: String,
    raw_text: String,
    source_label: String,
    references: OnceCell<Vec<Reference>>,
}

impl ProcedureRecord {
    /// Parse a source file into a record
    pub fn parse(source: SqlSource) -> Result<Self, ProcMapError> {
        let SqlSource { label, text } = source;

        let declaration =
            parse_procedure_declaration(&text).ok_or_else(|| ProcMapError::MalformedDefinition {
                source_label: label.clone(),
                message: "no CREATE PROCEDURE header found".to_string(),
            })?;

        let identity =
            ProcedureIdentity::with_default_schema(declaration.schema.as_deref(), &declaration.name)
                .map_err(|message| ProcMapError::MalformedDefinition {
                    source_label: label.clone(),
                    message: message.to_string(),
                })?;

        Ok(Self {
            display_name: identity.display_name(),
            identity,
            raw_text: text,
            source_label: label,
            references: OnceCell::new(),
        })
    }

    pub fn identity(&self) -> &ProcedureIdentity {
        &self.identity
    }

    /// `[schema].[name]`
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn source_label(&self) -> &str {
        &self.source_label
    }

    pub fn is_match(&self, name: &str, schema: &str) -> bool {
        self.identity.is_match(name, schema)
    }

    /// Scan the text for call sites. Each call starts a fresh scan.
    pub fn scan_references(&self) -> impl Iterator<Item = Reference> + '_ {
        extract_exec_references(&self.raw_text).map(Reference::from)
    }

    /// Call sites in source order, scanned on first use and cached
    pub fn references(&self) -> &[Reference] {
        self.references
            .get_or_init(|| self.scan_references().collect())
    }
}
