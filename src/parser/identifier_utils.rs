//! Identifier handling utilities for T-SQL procedure names.
//!
//! SQL Server identifiers may be written bare (`GetUsers`) or bracketed
//! (`[GetUsers]`). Everything stored in the model is the bare form; brackets
//! are re-applied only when a name is rendered for output.
//!
//! # Examples
//!
//! ```ignore
//! use crate::parser::identifier_utils::*;
//!
//! assert_eq!(normalize_identifier("[GetUsers]"), "GetUsers");
//! assert_eq!(ensure_bracketed("GetUsers"), "[GetUsers]");
//! assert_eq!(qualified_display_name("dbo", "GetUsers"), "[dbo].[GetUsers]");
//! ```

/// Schema assumed when a declaration or EXEC reference omits one.
pub const DEFAULT_SCHEMA: &str = "dbo";

/// Strips surrounding whitespace and brackets `[]` from an identifier.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_identifier("[MyProc]"), "MyProc");
/// assert_eq!(normalize_identifier("  [Trimmed]  "), "Trimmed");
/// assert_eq!(normalize_identifier("dbo"), "dbo");
/// ```
pub fn normalize_identifier(ident: &str) -> String {
    ident
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .trim()
        .to_string()
}

/// Ensures an identifier is wrapped in brackets.
///
/// If the identifier is already bracketed, it is returned as-is.
pub fn ensure_bracketed(ident: &str) -> String {
    let trimmed = ident.trim();
    if is_bracketed(trimmed) {
        trimmed.to_string()
    } else {
        format!("[{}]", normalize_identifier(trimmed))
    }
}

/// Checks if a string is a bracketed identifier (starts with `[` and ends with `]`).
pub fn is_bracketed(ident: &str) -> bool {
    let trimmed = ident.trim();
    trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']')
}

/// Renders a schema/name pair as `[schema].[name]`.
pub fn qualified_display_name(schema: &str, name: &str) -> String {
    format!("{}.{}", ensure_bracketed(schema), ensure_bracketed(name))
}

/// Returns `true` when the identifier is empty or whitespace once brackets are stripped.
pub fn is_blank_identifier(ident: &str) -> bool {
    normalize_identifier(ident).is_empty()
}
