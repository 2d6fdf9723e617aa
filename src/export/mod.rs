use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::season::DriverStanding;

/// Serialize the ranked season as CSV text: per class, a line holding just the
/// class name, then one line per driver — empty leading field, name, total,
/// then each retained score. Lines are newline-joined with no trailing
/// newline.
///
/// No quoting or escaping is applied; a class or driver name containing a
/// comma will corrupt the output.
pub fn to_csv(ranked: &BTreeMap<String, Vec<DriverStanding>>) -> String {
    let mut lines = Vec::new();
    for (class, standings) in ranked {
        lines.push(class.clone());
        for standing in standings {
            let mut line = format!(",{},{}", standing.name, standing.total);
            for score in &standing.scores {
                line.push(',');
                line.push_str(&score.to_string());
            }
            lines.push(line);
        }
    }
    lines.join("\n")
}

/// Write the serialized season to `path`.
pub async fn write_csv(path: &Path, ranked: &BTreeMap<String, Vec<DriverStanding>>) -> Result<()> {
    tokio::fs::write(path, to_csv(ranked))
        .await
        .with_context(|| format!("writing report to {}", path.display()))
}
