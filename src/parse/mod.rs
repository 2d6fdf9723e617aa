pub mod rows;

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::debug;

use crate::config::RowValidation;
use crate::error::PipelineError;
use crate::score::ScoreTable;
use rows::{extract_row, has_lap_token};

/// Class bucket for result rows that appear before any class header line.
pub const UNCLASSIFIED: &str = "unclassified";

/// One event's parsed results: class name → driver name → points earned.
/// Ordered maps so every downstream iteration is deterministic.
pub type ParsedEvent = BTreeMap<String, BTreeMap<String, u32>>;

/// Line-at-a-time parser for one event's text result file. A class header line
/// flushes the open class and starts the next; `finish` flushes whatever class
/// is still open at end of input.
pub struct EventParser<'a> {
    table: &'a ScoreTable,
    validation: RowValidation,
    classes: ParsedEvent,
    current_class: Option<String>,
    current_drivers: BTreeMap<String, u32>,
}

impl<'a> EventParser<'a> {
    pub fn new(table: &'a ScoreTable, validation: RowValidation) -> Self {
        EventParser {
            table,
            validation,
            classes: ParsedEvent::new(),
            current_class: None,
            current_drivers: BTreeMap::new(),
        }
    }

    /// Process a single raw line. Fails only on a malformed result row.
    pub fn push_line(&mut self, raw: &str) -> Result<()> {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('[') || line.starts_with('+') {
            return Ok(());
        }

        if line.starts_with(|c: char| c.is_ascii_digit()) {
            return self.push_result_row(line);
        }

        // Anything else opens a new class named by the line's first token.
        self.flush_class();
        let name = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        self.current_class = Some(name);
        Ok(())
    }

    fn push_result_row(&mut self, line: &str) -> Result<()> {
        if self.validation == RowValidation::Lenient && !has_lap_token(line) {
            // Row-shaped but no lap/gap time anywhere: a header artifact,
            // not a finisher.
            debug!(line, "skipping digit-leading line without lap token");
            return Ok(());
        }

        let row = extract_row(line).ok_or_else(|| PipelineError::MalformedLine {
            line: line.to_string(),
        })?;
        let points = self.table.points_for(row.position);
        // Last occurrence of a driver within one class wins.
        self.current_drivers.insert(row.driver, points);
        Ok(())
    }

    /// Move the open class, if any, into the result mapping. Rows seen before
    /// any header land under [`UNCLASSIFIED`].
    fn flush_class(&mut self) {
        if self.current_class.is_none() && self.current_drivers.is_empty() {
            return;
        }
        let name = self
            .current_class
            .take()
            .unwrap_or_else(|| UNCLASSIFIED.to_string());
        let drivers = std::mem::take(&mut self.current_drivers);
        self.classes.insert(name, drivers);
    }

    /// Finalize: flush the open class and hand back the event, or `None` if
    /// nothing content-bearing was seen.
    pub fn finish(mut self) -> Option<ParsedEvent> {
        self.flush_class();
        if self.classes.is_empty() {
            None
        } else {
            Some(self.classes)
        }
    }
}

/// Parse one event file's full text. `Ok(None)` means the content was empty or
/// whitespace-only — nothing to parse, not an error.
pub fn parse_event(
    content: &str,
    table: &ScoreTable,
    validation: RowValidation,
) -> Result<Option<ParsedEvent>> {
    if content.trim().is_empty() {
        return Ok(None);
    }
    let mut parser = EventParser::new(table, validation);
    for line in content.lines() {
        parser.push_line(line)?;
    }
    Ok(parser.finish())
}
