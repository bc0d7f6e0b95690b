//! Pose table validation

use anyhow::{Context, Result};
use cusp_pose::{fetch_pose_table, PoseSource, PoseTable};

pub struct CheckArgs {
    pub table: String,
    pub teeth: Vec<String>,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let source = PoseSource::parse(&args.table);
    let table = fetch_pose_table(&source)
        .with_context(|| format!("Failed to load pose table from {}", source))?;

    let report = CheckReport::new(&table, &args.teeth);
    print!("{}", report);

    if !report.is_valid() {
        std::process::exit(1);
    }
    Ok(())
}

struct CheckReport {
    records: usize,
    skipped: Vec<String>,
    missing: Vec<String>,
}

impl CheckReport {
    fn new(table: &PoseTable, teeth: &[String]) -> Self {
        Self {
            records: table.len(),
            skipped: table
                .skipped()
                .iter()
                .map(|s| format!("line {}: {}", s.line_number, s.reason))
                .collect(),
            missing: teeth
                .iter()
                .filter(|id| !table.contains(id))
                .cloned()
                .collect(),
        }
    }

    fn is_valid(&self) -> bool {
        self.skipped.is_empty() && self.missing.is_empty()
    }
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} record(s)", self.records)?;
        for line in &self.skipped {
            writeln!(f, "  skipped {}", line)?;
        }
        if !self.missing.is_empty() {
            writeln!(f, "  missing teeth: {}", self.missing.join(", "))?;
        }
        if self.is_valid() {
            writeln!(f, "OK")
        } else {
            writeln!(
                f,
                "{} problem(s)",
                self.skipped.len() + self.missing.len()
            )
        }
    }
}
