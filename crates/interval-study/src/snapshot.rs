//! Loading experiment snapshots from CSV
//!
//! A snapshot is one row per trial with participant, condition, outcome,
//! and a comprehension-check flag. Column names vary between exports, so
//! they are configurable. Rows with missing or non-finite outcomes are
//! counted and skipped; structural problems (short rows, unreadable
//! flags) are fatal.

use crate::{Error, Result};
use interval_core::{Observation, SINGLE_FACET};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, instrument, warn};

/// Column names of a study snapshot
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    pub participant_column: String,
    pub condition_column: String,
    pub value_column: String,
    /// Optional stratum column; snapshots without it load as one stratum
    pub facet_column: String,
    pub comprehension_column: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            participant_column: "participant_id".to_string(),
            condition_column: "condition".to_string(),
            value_column: "response".to_string(),
            facet_column: "facet".to_string(),
            comprehension_column: "passed_comprehension".to_string(),
        }
    }
}

/// One parsed snapshot row
#[derive(Debug, Clone, PartialEq)]
pub struct StudyRecord {
    pub participant: String,
    pub condition: String,
    pub facet: String,
    pub value: f64,
    pub passed_comprehension: bool,
}

/// Reads snapshot rows from any CSV source.
pub fn read_snapshot<R: Read>(reader: R, config: &SnapshotConfig) -> Result<Vec<StudyRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let participant_idx = column(&config.participant_column)
        .ok_or_else(|| Error::MissingColumn(config.participant_column.clone()))?;
    let condition_idx = column(&config.condition_column)
        .ok_or_else(|| Error::MissingColumn(config.condition_column.clone()))?;
    let value_idx = column(&config.value_column)
        .ok_or_else(|| Error::MissingColumn(config.value_column.clone()))?;
    let comprehension_idx = column(&config.comprehension_column)
        .ok_or_else(|| Error::MissingColumn(config.comprehension_column.clone()))?;
    let facet_idx = column(&config.facet_column);
    if facet_idx.is_none() {
        debug!(column = %config.facet_column, "no facet column, loading as a single stratum");
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in csv_reader.records().enumerate() {
        let record = result?;
        // Physical line from the parser, exact even when quoted fields
        // span lines. The fallback assumes one line per row, header on
        // line 1.
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(row + 2);

        let field = |idx: usize| -> Result<&str> {
            record.get(idx).ok_or_else(|| Error::InvalidRecord {
                line,
                reason: "row has fewer fields than the header".to_string(),
            })
        };

        let raw_value = field(value_idx)?;
        let value = match raw_value.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let participant = field(participant_idx)?;
        let condition = field(condition_idx)?;
        if participant.is_empty() || condition.is_empty() {
            return Err(Error::InvalidRecord {
                line,
                reason: "empty participant or condition".to_string(),
            });
        }

        let raw_flag = field(comprehension_idx)?;
        let passed_comprehension = parse_flag(raw_flag).ok_or_else(|| Error::InvalidRecord {
            line,
            reason: format!("unreadable comprehension flag {raw_flag:?}"),
        })?;

        let facet = match facet_idx.and_then(|idx| record.get(idx)) {
            Some(facet) if !facet.is_empty() => facet.to_string(),
            _ => SINGLE_FACET.to_string(),
        };

        records.push(StudyRecord {
            participant: participant.to_string(),
            condition: condition.to_string(),
            facet,
            value,
            passed_comprehension,
        });
    }

    if skipped > 0 {
        warn!(skipped, "skipped rows with missing or non-finite outcomes");
    }
    debug!(rows = records.len(), "loaded snapshot");
    Ok(records)
}

/// Reads a snapshot file from disk.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_snapshot<P: AsRef<Path>>(path: P, config: &SnapshotConfig) -> Result<Vec<StudyRecord>> {
    let file = File::open(path.as_ref())?;
    read_snapshot(file, config)
}

/// Drops every record of any participant who failed the comprehension
/// check. Exclusion happens at the participant level, not per row.
pub fn retain_passing(records: Vec<StudyRecord>) -> Vec<StudyRecord> {
    let failing: BTreeSet<String> = records
        .iter()
        .filter(|r| !r.passed_comprehension)
        .map(|r| r.participant.clone())
        .collect();
    if failing.is_empty() {
        return records;
    }

    let before = records.len();
    let kept: Vec<StudyRecord> = records
        .into_iter()
        .filter(|r| !failing.contains(&r.participant))
        .collect();
    warn!(
        participants = failing.len(),
        records = before - kept.len(),
        "dropped participants failing the comprehension check"
    );
    kept
}

/// Bridges study rows into the core observation model.
pub fn to_observations(records: &[StudyRecord]) -> Vec<Observation> {
    records
        .iter()
        .map(|r| Observation::new(r.value, r.condition.as_str(), r.facet.as_str()))
        .collect()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}
