//! Procedure model elements

use std::fmt;

use crate::parser::identifier_utils::{
    is_blank_identifier, normalize_identifier, qualified_display_name, DEFAULT_SCHEMA,
};
use crate::parser::ExtractedExecReference;
use crate::util::{eq_ci, fold_ci};

/// One stored-procedure source handed over by the file-system layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlSource {
    /// Label used in diagnostics (usually the path relative to the scanned folder)
    pub label: String,
    /// Full text of the file
    pub text: String,
}

impl SqlSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Qualified procedure name. Comparison ignores case on both parts.
#[derive(Debug, Clone, Eq)]
pub struct ProcedureIdentity {
    schema: String,
    name: String,
}

impl ProcedureIdentity {
    /// Build an identity from possibly bracketed parts.
    ///
    /// Fails when either part is empty or whitespace once brackets are removed.
    pub fn new(schema: &str, name: &str) -> Result<Self, &'static str> {
        if is_blank_identifier(name) {
            return Err("procedure name is empty");
        }
        if is_blank_identifier(schema) {
            return Err("schema name is empty");
        }
        Ok(Self {
            schema: normalize_identifier(schema),
            name: normalize_identifier(name),
        })
    }

    /// Build an identity, using `dbo` when no schema was written
    pub fn with_default_schema(schema: Option<&str>, name: &str) -> Result<Self, &'static str> {
        Self::new(schema.unwrap_or(DEFAULT_SCHEMA), name)
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` iff both parts equal the given ones, ignoring case
    pub fn is_match(&self, name: &str, schema: &str) -> bool {
        eq_ci(&self.name, name) && eq_ci(&self.schema, schema)
    }

    /// `[schema].[name]`
    pub fn display_name(&self) -> String {
        qualified_display_name(&self.schema, &self.name)
    }

    /// Case-folded `(schema, name)` pair used as a lookup key
    pub(crate) fn lookup_key(&self) -> (String, String) {
        (fold_ci(&self.schema), fold_ci(&self.name))
    }
}

impl PartialEq for ProcedureIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.is_match(&other.name, &other.schema)
    }
}

impl fmt::Display for ProcedureIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// A call site found in a procedure body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Schema as written, `None` when omitted
    pub schema: Option<String>,
    /// Target procedure name
    pub name: String,
}

impl Reference {
    /// Resolve to a qualified identity, defaulting the schema to `dbo`
    pub fn identity(&self) -> Result<ProcedureIdentity, &'static str> {
        ProcedureIdentity::with_default_schema(self.schema.as_deref(), &self.name)
    }
}

impl From<ExtractedExecReference> for Reference {
    fn from(extracted: ExtractedExecReference) -> Self {
        Self {
            schema: extracted.schema,
            name: extracted.name,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => f.write_str(&self.name),
        }
    }
}
