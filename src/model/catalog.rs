//! Catalog of every procedure found in a folder

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::{ProcedureIdentity, ProcedureRecord, SqlSource};
use crate::error::ProcMapError;
use crate::parser::identifier_utils::normalize_identifier;
use crate::util::fold_ci;

/// Minimum number of sources to benefit from parallel parsing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
const PARALLEL_THRESHOLD: usize = 8;

/// What to do with a file or call site whose procedure name cannot be read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort on the first malformed definition or reference
    #[default]
    Strict,
    /// Log a warning and leave the offending file or reference out
    Skip,
}

/// Immutable set of parsed procedures with case-insensitive lookup
#[derive(Debug)]
pub struct ProcedureCatalog {
    records: Vec<ProcedureRecord>,
    index: HashMap<(String, String), Vec<usize>>,
    skipped: Vec<String>,
    policy: MalformedPolicy,
}

impl ProcedureCatalog {
    /// Parse every source into a record, keeping input order
    pub fn from_sources(
        sources: Vec<SqlSource>,
        policy: MalformedPolicy,
    ) -> Result<Self, ProcMapError> {
        let total = sources.len();
        let parsed: Vec<Result<ProcedureRecord, ProcMapError>> = if total >= PARALLEL_THRESHOLD {
            sources.into_par_iter().map(ProcedureRecord::parse).collect()
        } else {
            sources.into_iter().map(ProcedureRecord::parse).collect()
        };

        let mut records = Vec::with_capacity(total);
        let mut skipped = Vec::new();
        for result in parsed {
            match result {
                Ok(record) => {
                    debug!(
                        procedure = record.display_name(),
                        source = record.source_label(),
                        "catalogued procedure"
                    );
                    records.push(record);
                }
                Err(ProcMapError::MalformedDefinition {
                    source_label,
                    message,
                }) if policy == MalformedPolicy::Skip => {
                    warn!(source = %source_label, reason = %message, "skipping malformed procedure file");
                    skipped.push(source_label);
                }
                Err(err) => return Err(err),
            }
        }

        let mut index: HashMap<(String, String), Vec<usize>> = HashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            index
                .entry(record.identity().lookup_key())
                .or_default()
                .push(position);
        }
        for positions in index.values().filter(|p| p.len() > 1) {
            warn!(
                procedure = records[positions[0]].display_name(),
                definitions = positions.len(),
                "procedure is defined more than once"
            );
        }

        info!(
            procedures = records.len(),
            skipped = skipped.len(),
            "procedure catalog built"
        );

        Ok(Self {
            records,
            index,
            skipped,
            policy,
        })
    }

    /// Find the one procedure named `name` in `schema`, ignoring case and brackets.
    ///
    /// Returns `Ok(None)` when nothing matches and `AmbiguousProcedure` when
    /// several files declare the same procedure.
    pub fn lookup(&self, name: &str, schema: &str) -> Result<Option<&ProcedureRecord>, ProcMapError> {
        let name = normalize_identifier(name);
        let schema = normalize_identifier(schema);
        let key = (fold_ci(&schema), fold_ci(&name));

        let matches: Vec<&ProcedureRecord> = self
            .index
            .get(&key)
            .into_iter()
            .flatten()
            .map(|&position| &self.records[position])
            .filter(|record| record.is_match(&name, &schema))
            .collect();

        match matches.as_slice() {
            [] => Ok(None),
            [record] => Ok(Some(*record)),
            [first, ..] => Err(ProcMapError::AmbiguousProcedure {
                procedure: first.display_name().to_string(),
                sources: matches
                    .iter()
                    .map(|record| record.source_label().to_string())
                    .collect(),
            }),
        }
    }

    pub fn lookup_identity(
        &self,
        identity: &ProcedureIdentity,
    ) -> Result<Option<&ProcedureRecord>, ProcMapError> {
        self.lookup(identity.name(), identity.schema())
    }

    /// Records in the order their sources were supplied
    pub fn procedures(&self) -> impl Iterator<Item = &ProcedureRecord> {
        self.records.iter()
    }

    /// Labels of sources left out under [`MalformedPolicy::Skip`]
    pub fn skipped_sources(&self) -> &[String] {
        &self.skipped
    }

    pub fn policy(&self) -> MalformedPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
