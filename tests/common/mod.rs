//! Common test utilities for rust-procmap tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rust_procmap::{DiscoveryOptions, MalformedPolicy, MapOptions, MapOutcome, TreeStyle};
use tempfile::TempDir;

/// Folder SSDT projects use for procedure scripts
pub const PROCEDURES_DIR: &str = "dbo/Stored Procedures";

/// Test context with temporary directory for isolated test execution
pub struct TestContext {
    /// Kept to prevent temp directory cleanup until TestContext is dropped
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestContext {
    /// Create an empty project folder
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Create a project folder with `(file name, sql)` pairs in the default procedures folder
    pub fn with_procedures(procedures: &[(&str, String)]) -> Self {
        let ctx = Self::new();
        for (name, sql) in procedures {
            ctx.write_file(&format!("{}/{}", PROCEDURES_DIR, name), sql);
        }
        ctx
    }

    /// Write a file at a path relative to the project root
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        self.write_bytes(relative, content.as_bytes())
    }

    pub fn write_bytes(&self, relative: &str, content: &[u8]) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn options(&self, schema: &str, procedure: &str) -> MapOptions {
        MapOptions {
            root: self.root.clone(),
            schema: schema.to_string(),
            procedure: procedure.to_string(),
            discovery: DiscoveryOptions::default(),
            malformed: MalformedPolicy::Strict,
            style: TreeStyle::default(),
        }
    }

    /// Map with default options
    pub fn map(&self, schema: &str, procedure: &str) -> MapResult {
        self.map_with(&self.options(schema, procedure))
    }

    pub fn map_with(&self, options: &MapOptions) -> MapResult {
        let mut lines = Vec::new();
        let result = rust_procmap::map_procedure(options, |line: &str| {
            lines.push(line.to_string())
        });
        match result {
            Ok(outcome) => MapResult {
                outcome: Some(outcome),
                lines,
                errors: vec![],
            },
            Err(e) => MapResult {
                outcome: None,
                lines,
                errors: vec![e.to_string()],
            },
        }
    }

    /// Map and return the tree lines, panicking if mapping fails or the start is missing
    pub fn map_successfully(&self, schema: &str, procedure: &str) -> Vec<String> {
        let result = self.map(schema, procedure);
        assert!(
            matches!(result.outcome, Some(MapOutcome::Mapped { .. })),
            "Mapping [{}].[{}] failed: {:?} {:?}",
            schema,
            procedure,
            result.outcome,
            result.errors
        );
        result.lines
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

/// Result of a mapping run
#[derive(Debug)]
pub struct MapResult {
    pub outcome: Option<MapOutcome>,
    pub lines: Vec<String>,
    pub errors: Vec<String>,
}

/// Build the expected tree line for `name` at `depth` with the default style
pub fn line(depth: usize, name: &str) -> String {
    format!("{}{}", "|\t".repeat(depth), name)
}

/// Expected cycle line for `name` at `depth` with the default style
pub fn cycle(depth: usize, name: &str) -> String {
    format!("{}{}...", "|\t".repeat(depth), name)
}

/// Simple procedure body calling each target in turn
pub fn procedure(schema_and_name: &str, calls: &[&str]) -> String {
    let mut sql = format!("CREATE PROCEDURE {}\nAS\nBEGIN\n    SET NOCOUNT ON;\n", schema_and_name);
    for call in calls {
        sql.push_str(&format!("    EXEC {};\n", call));
    }
    sql.push_str("END\nGO\n");
    sql
}

pub fn relative(root: &Path, path: &Path) -> String {
    rust_procmap::project::relative_label(root, path)
}
