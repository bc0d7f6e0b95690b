//! Pose table listing

use anyhow::{Context, Result};
use cusp_pose::{fetch_pose_table, PoseSource, PoseTable};
use serde_json::json;

pub fn run(location: &str, format: &str) -> Result<()> {
    let source = PoseSource::parse(location);
    let table = fetch_pose_table(&source)
        .with_context(|| format!("Failed to load pose table from {}", source))?;

    let output = match format {
        "text" => format_text(&table),
        "json" => format_json(&table)?,
        _ => anyhow::bail!("Unknown format: {}", format),
    };
    print!("{}", output);
    Ok(())
}

fn format_text(table: &PoseTable) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} record(s)\n", table.len()));
    out.push_str("# id px py pz qx qy qz qw\n");
    for record in table.sorted() {
        out.push_str(&format!("{}\n", record));
    }
    out.push_str(&format!(
        "axis indicator size: {:.3}\n",
        table.axis_indicator_size()
    ));

    if !table.skipped().is_empty() {
        out.push_str(&format!("\n{} skipped line(s):\n", table.skipped().len()));
        for skipped in table.skipped() {
            out.push_str(&format!("  line {}: {}\n", skipped.line_number, skipped.reason));
        }
    }
    out
}

fn format_json(table: &PoseTable) -> Result<String> {
    let skipped: Vec<_> = table
        .skipped()
        .iter()
        .map(|s| json!({ "line": s.line_number, "reason": s.reason.to_string() }))
        .collect();
    let value = json!({
        "records": table.sorted(),
        "axis_indicator_size": table.axis_indicator_size(),
        "skipped": skipped,
    });
    Ok(format!("{}\n", serde_json::to_string_pretty(&value)?))
}
