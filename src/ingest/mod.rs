use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::PipelineError;
use crate::parse::{parse_event, ParsedEvent};

/// Numeric event id pulled from a file name. Ascending id order is the season's
/// processing order.
pub type EventId = u32;

/// `event 12`, `Event12`, `EVENT 3` — case-insensitive, space optional.
static EVENT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)event\s*(\d+)").unwrap());

/// Read every event file in `dir` and parse it, keyed by event id.
///
/// Skips subdirectories, `.csv` files (prior output, not source data) and
/// empty files. Files are read one at a time; a malformed row or a file name
/// without an event id aborts the whole scan.
pub async fn read_event_dir(dir: &Path, config: &Config) -> Result<BTreeMap<EventId, ParsedEvent>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("reading event directory {}", dir.display()))?;

    let mut events = BTreeMap::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("listing event directory {}", dir.display()))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("stat {}", path.display()))?;
        if !file_type.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if file_name.to_lowercase().ends_with(".csv") {
            debug!(file = %file_name, "skipping csv file");
            continue;
        }

        let bytes = tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let content = String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

        let parsed = parse_event(&content, &config.score_table, config.row_validation)
            .with_context(|| format!("parsing {}", path.display()))?;
        let Some(event) = parsed else {
            debug!(file = %file_name, "skipping empty event file");
            continue;
        };

        let id = extract_event_id(&file_name).ok_or_else(|| PipelineError::MissingEventId {
            file_name: file_name.clone(),
        })?;
        if events.insert(id, event).is_some() {
            warn!(id, file = %file_name, "duplicate event id, keeping later file");
        }
    }

    Ok(events)
}

pub fn extract_event_id(file_name: &str) -> Option<EventId> {
    EVENT_ID
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn test_config() -> Config {
        Config::default()
    }

    #[test]
    fn event_id_is_case_insensitive_and_numeric() {
        assert_eq!(extract_event_id("results event 3.txt"), Some(3));
        assert_eq!(extract_event_id("Event 12 - wet race.txt"), Some(12));
        assert_eq!(extract_event_id("EVENT7.txt"), Some(7));
        assert_eq!(extract_event_id("practice session.txt"), None);
    }

    #[tokio::test]
    async fn reads_events_in_ascending_id_order() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("event 10.txt"),
            "GT3\n1 045 Alice Driver 01:09.332",
        )?;
        fs::write(
            dir.path().join("event 2.txt"),
            "GT3\n1 045 Bob Racer 01:10.118",
        )?;

        let events = read_event_dir(dir.path(), &test_config()).await?;
        let ids: Vec<_> = events.keys().copied().collect();
        // numeric order, not lexicographic "10" < "2"
        assert_eq!(ids, vec![2, 10]);
        Ok(())
    }

    #[tokio::test]
    async fn empty_files_and_csv_files_are_skipped() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("event 1.txt"), "")?;
        fs::write(dir.path().join("event 2.txt"), "   \n\n")?;
        fs::write(dir.path().join("season EVENT 9.CSV"), "GT3\nnot source data")?;
        fs::write(
            dir.path().join("event 3.txt"),
            "GT3\n1 045 Alice Driver 01:09.332",
        )?;

        let events = read_event_dir(dir.path(), &test_config()).await?;
        assert_eq!(events.keys().copied().collect::<Vec<_>>(), vec![3]);
        Ok(())
    }

    #[tokio::test]
    async fn subdirectories_are_ignored() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::create_dir(dir.path().join("event 4 notes"))?;
        let events = read_event_dir(dir.path(), &test_config()).await?;
        assert!(events.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn file_without_event_id_is_fatal() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("round 5.txt"),
            "GT3\n1 045 Alice Driver 01:09.332",
        )?;

        let err = read_event_dir(dir.path(), &test_config()).await.unwrap_err();
        match err.downcast_ref::<PipelineError>() {
            Some(PipelineError::MissingEventId { file_name }) => {
                assert_eq!(file_name, "round 5.txt")
            }
            other => panic!("expected MissingEventId, got {:?}", other),
        }
        Ok(())
    }
}
