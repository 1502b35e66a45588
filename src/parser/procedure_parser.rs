//! Procedure declaration parsing for T-SQL
//!
//! Locates the `CREATE PROCEDURE` header of a stored-procedure source file and
//! returns the declared schema and name with brackets stripped.
//!
//! ## Supported Syntax
//!
//! ```sql
//! CREATE PROCEDURE [schema].[name] AS ...
//! CREATE PROC schema.name AS ...
//! CREATE PROCEDURE name AS ...
//! CREATE OR ALTER PROCEDURE [schema].[name] AS ...
//! ALTER PROC [schema].[name] AS ...
//! ```
//!
//! Headers that sit inside a comment are ignored.

use once_cell::sync::Lazy;
use regex::Regex;

use super::comments::CommentMask;
use super::identifier_utils::normalize_identifier;

static DECLARATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:CREATE(?:\s+OR\s+ALTER)?|ALTER)\s+PROC(?:EDURE)?\s+(?:\[?(\w[\w-]*)\]?\.)?\[?(\w[\w-]*)\]?",
    )
    .expect("Invalid procedure declaration regex")
});

/// Schema and name found in a procedure header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeclaration {
    /// Declared schema, `None` when the header omits it
    pub schema: Option<String>,
    /// Declared procedure name
    pub name: String,
}

/// Find the first procedure header in `sql` that is not commented out
pub fn parse_procedure_declaration(sql: &str) -> Option<ParsedDeclaration> {
    let mask = CommentMask::scan(sql);
    DECLARATION_RE
        .captures_iter(sql)
        .find(|caps| !mask.contains(caps.get(0).map_or(0, |m| m.start())))
        .map(|caps| ParsedDeclaration {
            schema: caps.get(1).map(|m| normalize_identifier(m.as_str())),
            name: caps
                .get(2)
                .map(|m| normalize_identifier(m.as_str()))
                .unwrap_or_default(),
        })
}
