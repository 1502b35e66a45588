//! Comment detection for T-SQL source text
//!
//! Produces the byte ranges covered by `--` line comments and `/* ... */`
//! block comments so regex matches that start inside them can be discarded.
//! Single-quoted strings and bracketed identifiers are skipped while scanning
//! so `'--'` or `[a/*b]` do not open a comment. This is a lexical pass only;
//! nothing else about the SQL is interpreted.

use std::ops::Range;

/// Sorted, non-overlapping byte ranges of every comment in a SQL text
#[derive(Debug, Clone, Default)]
pub struct CommentMask {
    ranges: Vec<Range<usize>>,
}

impl CommentMask {
    /// Scan `sql` and record every comment range
    pub fn scan(sql: &str) -> Self {
        let bytes = sql.as_bytes();
        let len = bytes.len();
        let mut ranges = Vec::new();
        let mut i = 0;

        while i < len {
            match bytes[i] {
                b'\'' => i = skip_quoted(bytes, i, b'\''),
                b'[' => i = skip_quoted(bytes, i, b']'),
                b'-' if bytes.get(i + 1) == Some(&b'-') => {
                    let start = i;
                    while i < len && bytes[i] != b'\n' {
                        i += 1;
                    }
                    ranges.push(start..i);
                }
                b'/' if bytes.get(i + 1) == Some(&b'*') => {
                    // T-SQL block comments nest
                    let start = i;
                    let mut depth = 1;
                    i += 2;
                    while i < len && depth > 0 {
                        match (bytes[i], bytes.get(i + 1)) {
                            (b'/', Some(b'*')) => {
                                depth += 1;
                                i += 2;
                            }
                            (b'*', Some(b'/')) => {
                                depth -= 1;
                                i += 2;
                            }
                            _ => i += 1,
                        }
                    }
                    ranges.push(start..i.min(len));
                }
                _ => i += 1,
            }
        }

        Self { ranges }
    }

    /// Returns `true` if the byte at `offset` lies inside a comment
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= offset);
        self.ranges
            .get(idx)
            .is_some_and(|range| range.start <= offset)
    }

    /// Number of comments found
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Skip a quoted run starting at `start`, returning the index just past the
/// closing delimiter. A doubled closing delimiter is an escape.
fn skip_quoted(bytes: &[u8], start: usize, close: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        if bytes[i] == close {
            if bytes.get(i + 1) == Some(&close) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}
