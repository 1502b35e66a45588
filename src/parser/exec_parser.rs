//! EXEC / EXECUTE call-site extraction for T-SQL
//!
//! Scans a procedure body for statements that invoke another procedure by
//! name. This is a lexical scan, not a SQL parse: dynamic SQL executed from a
//! variable or a parenthesised string is never reported.
//!
//! ## Recognised Forms
//!
//! ```sql
//! EXEC proc
//! EXECUTE schema.proc
//! EXEC [schema].[proc] @arg = 1
//! EXEC @rc = schema.proc
//! EXEC database.schema.proc
//! EXEC database..proc
//! ```
//!
//! ## Ignored
//!
//! - call sites inside `--` or `/* */` comments
//! - call sites written directly after `print '` (messages echoing a call)
//! - `EXECUTE ON ...` and `EXECUTE AS ...` clauses

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::comments::CommentMask;
use super::identifier_utils::normalize_identifier;

static EXEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(EXEC(?:UTE)?)\s+(?:@\w+\s*=\s*)?(?:\[?(\w[\w-]*)\]?\.)?(?:\[?(\w[\w-]*)\]?\.|(\.))?\[?(\w[\w-]*)\]?",
    )
    .expect("Invalid EXEC regex")
});

/// Keywords that turn `EXEC` into a clause rather than a call
static CLAUSE_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:ON|AS)\b").expect("Invalid clause keyword regex"));

/// A `print '` immediately before the call site
static PRINT_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bprint\s*'\s*$").expect("Invalid print prefix regex"));

/// A single call site found in procedure text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedExecReference {
    /// Schema segment, `None` when the call omits it (or leaves it empty as in `db..proc`)
    pub schema: Option<String>,
    /// Target procedure name (last segment)
    pub name: String,
    /// Byte offset of the `EXEC` keyword in the source text
    pub offset: usize,
}

/// Iterator over the call sites of one SQL text, in source order
pub struct ExecReferences<'a> {
    sql: &'a str,
    mask: CommentMask,
    cursor: usize,
}

impl<'a> Iterator for ExecReferences<'a> {
    type Item = ExtractedExecReference;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor <= self.sql.len() {
            let caps = EXEC_RE.captures_at(self.sql, self.cursor)?;
            let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(1)) else {
                return None;
            };

            match accept_match(self.sql, &self.mask, &caps) {
                Some(reference) => {
                    self.cursor = whole.end();
                    return Some(reference);
                }
                // A rejected match can span the next real call site.
                None => self.cursor = keyword.end(),
            }
        }
        None
    }
}

/// Lazily scan `sql` for EXEC call sites. Calling this again restarts the scan.
pub fn extract_exec_references(sql: &str) -> ExecReferences<'_> {
    ExecReferences {
        sql,
        mask: CommentMask::scan(sql),
        cursor: 0,
    }
}

fn accept_match(sql: &str, mask: &CommentMask, caps: &Captures<'_>) -> Option<ExtractedExecReference> {
    let keyword = caps.get(1)?;
    let target = caps.get(5)?;

    if is_exec_keyword(target.as_str()) {
        return None;
    }

    if mask.contains(keyword.start()) || mask.contains(target.start()) {
        return None;
    }
    if CLAUSE_KEYWORD_RE.is_match(&sql[keyword.end()..]) {
        return None;
    }

    let line_start = sql[..keyword.start()].rfind('\n').map_or(0, |pos| pos + 1);
    if PRINT_PREFIX_RE.is_match(&sql[line_start..keyword.start()]) {
        return None;
    }

    // Name is always the last segment; schema is the one right before it.
    // In `db..proc` the schema slot is present but empty.
    let schema = match (caps.get(3), caps.get(4), caps.get(2)) {
        (Some(schema), _, _) => Some(schema.as_str()),
        (None, Some(_), _) => None,
        (None, None, first) => first.map(|m| m.as_str()),
    };

    Some(ExtractedExecReference {
        schema: schema.map(normalize_identifier),
        name: normalize_identifier(target.as_str()),
        offset: keyword.start(),
    })
}

fn is_exec_keyword(word: &str) -> bool {
    word.eq_ignore_ascii_case("EXEC") || word.eq_ignore_ascii_case("EXECUTE")
}
