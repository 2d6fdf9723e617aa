use once_cell::sync::Lazy;
use regex::Regex;

/// Result-row shape: finishing position, a separator, an exactly-3-digit car
/// token (skipped), a separator, then the driver name. The name group is
/// letter-led name text so it stops before any trailing lap-time columns; the
/// `\D` separators keep a 4-digit token from matching as the car number.
static RESULT_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\D+(\d{3})\D+(\p{L}[\p{L} .'\-]*)").unwrap());

/// `NN.NNN` lap-time/gap token used by lenient mode to tell real finisher rows
/// from row-shaped header artifacts.
static LAP_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2}\.\d{3}").unwrap());

/// A finisher row pulled out of one line: 1-based position and display name.
#[derive(Debug, PartialEq, Eq)]
pub struct ResultRow {
    pub position: u32,
    pub driver: String,
}

/// Extract a finisher row from a trimmed, digit-leading line. `None` means the
/// line does not have the row shape; whether that is fatal is the caller's
/// (strictness-dependent) call.
pub fn extract_row(line: &str) -> Option<ResultRow> {
    let caps = RESULT_ROW.captures(line)?;
    let position: u32 = caps[1].parse().ok()?;
    let driver = normalize_name(&caps[3]);
    if driver.is_empty() {
        return None;
    }
    Some(ResultRow { position, driver })
}

pub fn has_lap_token(line: &str) -> bool {
    LAP_TOKEN.is_match(line)
}

/// Driver names key the season aggregate, so stray spacing must not split one
/// driver into two entries: trim and collapse internal whitespace runs. Case is
/// preserved; names are display strings.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
