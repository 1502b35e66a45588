//! Depth-first call tree rendering
//!
//! Every path from the start procedure is written out in full: a procedure
//! reached through two different callers (a diamond) is expanded under each
//! of them. Expansion stops only when a procedure is already an ancestor on
//! the current path, in which case it is written once more with the cycle
//! marker and not descended into. The ancestor path grows by one entry per
//! level and never repeats, so recursion depth is bounded by the number of
//! distinct procedures reachable from the start.

use super::CallGraphResolver;
use crate::error::ProcMapError;
use crate::model::{ProcedureCatalog, ProcedureRecord};

/// Formatting of tree lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeStyle {
    /// Repeated once per depth level before the procedure name
    pub padding: String,
    /// Appended to a procedure that closes a cycle
    pub cycle_marker: String,
}

impl Default for TreeStyle {
    fn default() -> Self {
        Self {
            padding: "|\t".to_string(),
            cycle_marker: "...".to_string(),
        }
    }
}

impl TreeStyle {
    fn line(&self, depth: usize, name: &str, cycle: bool) -> String {
        let marker = if cycle { self.cycle_marker.as_str() } else { "" };
        format!("{}{}{}", self.padding.repeat(depth), name, marker)
    }
}

/// Walks the call graph from a start record and hands each line to a sink
pub struct TreePrinter<'a, F>
where
    F: FnMut(&str),
{
    resolver: CallGraphResolver<'a>,
    style: TreeStyle,
    sink: F,
    lines: usize,
}

impl<'a, F> TreePrinter<'a, F>
where
    F: FnMut(&str),
{
    pub fn new(catalog: &'a ProcedureCatalog, style: TreeStyle, sink: F) -> Self {
        Self {
            resolver: CallGraphResolver::new(catalog),
            style,
            sink,
            lines: 0,
        }
    }

    /// Emit the tree rooted at `start`. Returns the number of lines written.
    pub fn print(&mut self, start: &'a ProcedureRecord) -> Result<usize, ProcMapError> {
        let before = self.lines;
        let mut ancestors: Vec<&'a str> = Vec::new();
        self.visit(start, &mut ancestors, 0)?;
        Ok(self.lines - before)
    }

    fn visit(
        &mut self,
        record: &'a ProcedureRecord,
        ancestors: &mut Vec<&'a str>,
        depth: usize,
    ) -> Result<(), ProcMapError> {
        self.emit(depth, record.display_name(), false);

        for target in self.resolver.resolve(record)? {
            let name = target.display_name();
            if ancestors.contains(&name) {
                self.emit(depth + 1, name, true);
            } else {
                ancestors.push(name);
                self.visit(target, ancestors, depth + 1)?;
                ancestors.pop();
            }
        }

        Ok(())
    }

    fn emit(&mut self, depth: usize, name: &str, cycle: bool) {
        let line = self.style.line(depth, name, cycle);
        (self.sink)(&line);
        self.lines += 1;
    }
}

/// Render the tree rooted at `start` into owned lines
pub fn render_tree(
    catalog: &ProcedureCatalog,
    start: &ProcedureRecord,
    style: TreeStyle,
) -> Result<Vec<String>, ProcMapError> {
    let mut lines = Vec::new();
    TreePrinter::new(catalog, style, |line: &str| lines.push(line.to_string())).print(start)?;
    Ok(lines)
}
