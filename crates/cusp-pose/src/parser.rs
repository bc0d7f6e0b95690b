//! Pose table parsing
//!
//! Malformed rows are soft failures: they are recorded in
//! [`PoseTable::skipped`], logged at debug level, and never abort the parse.

use crate::record::PoseRecord;
use cusp_core::frame::normalize_orientation;
use cusp_core::ToothId;
use glam::{DQuat, DVec3};
use std::collections::HashMap;
use std::fmt;

/// Id plus three position and four orientation columns.
const MIN_FIELDS: usize = 8;

const COLUMN_NAMES: [&str; 7] = ["px", "py", "pz", "qx", "qy", "qz", "qw"];

/// Why a line produced no record
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    TooFewFields(usize),
    NotANumber { column: &'static str, value: String },
    NotFinite { column: &'static str },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::TooFewFields(n) => {
                write!(f, "expected at least {} fields, got {}", MIN_FIELDS, n)
            }
            SkipReason::NotANumber { column, value } => {
                write!(f, "{} is not a number: '{}'", column, value)
            }
            SkipReason::NotFinite { column } => write!(f, "{} is not finite", column),
        }
    }
}

/// A malformed line, 1-based
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    pub line_number: usize,
    pub reason: SkipReason,
}

/// Parsed pose records keyed by tooth id.
#[derive(Debug, Clone, Default)]
pub struct PoseTable {
    records: HashMap<ToothId, PoseRecord>,
    skipped: Vec<SkippedLine>,
}

impl PoseTable {
    /// A table with no records, used when the resource could not be fetched.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&PoseRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoseRecord> {
        self.records.values()
    }

    /// Records sorted by tooth id, for stable output.
    pub fn sorted(&self) -> Vec<&PoseRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| a.tooth_id.cmp(&b.tooth_id));
        records
    }

    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// Length for per-tooth local axis helpers: 3% of the diagonal of the
    /// bounding box around all frame origins, never below 2.0.
    pub fn axis_indicator_size(&self) -> f64 {
        let mut origins = self.records.values().map(|r| r.position);
        let Some(first) = origins.next() else {
            return 2.0;
        };
        let (min, max) = origins.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        ((max - min).length() * 0.03).max(2.0)
    }
}

/// Parse a pose table.
///
/// Later rows override earlier rows for the same tooth id.
pub fn parse_pose_table(text: &str) -> PoseTable {
    let mut table = PoseTable::default();

    for (index, line) in split_lines(text).enumerate() {
        let line_number = index + 1;
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }

        match parse_line(s) {
            Ok(record) => {
                if table.records.contains_key(&record.tooth_id) {
                    tracing::debug!(tooth = %record.tooth_id, line_number, "pose row overrides earlier row");
                }
                table.records.insert(record.tooth_id.clone(), record);
            }
            Err(reason) => {
                tracing::debug!(line_number, %reason, "skipping pose row");
                table.skipped.push(SkippedLine {
                    line_number,
                    reason,
                });
            }
        }
    }

    tracing::debug!(
        records = table.records.len(),
        skipped = table.skipped.len(),
        "parsed pose table"
    );
    table
}

/// Split on `\n`, `\r\n` or a lone `\r`.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').flat_map(|line| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line.split('\r')
    })
}

fn parse_line(s: &str) -> Result<PoseRecord, SkipReason> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() < MIN_FIELDS {
        return Err(SkipReason::TooFewFields(parts.len()));
    }

    let mut values = [0.0f64; 7];
    for (i, (raw, column)) in parts[1..MIN_FIELDS].iter().zip(COLUMN_NAMES).enumerate() {
        let value: f64 = raw.parse().map_err(|_| SkipReason::NotANumber {
            column,
            value: raw.to_string(),
        })?;
        if !value.is_finite() {
            return Err(SkipReason::NotFinite { column });
        }
        values[i] = value;
    }

    let [px, py, pz, qx, qy, qz, qw] = values;
    Ok(PoseRecord {
        tooth_id: ToothId::from(parts[0]),
        position: DVec3::new(px, py, pz),
        orientation: normalize_orientation(DQuat::from_xyzw(qx, qy, qz, qw)),
    })
}
