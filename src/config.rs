use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::score::ScoreTable;

/// How digit-leading lines that fail the result-row pattern are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowValidation {
    /// Every digit-leading line must match the row pattern; any mismatch is
    /// fatal.
    Strict,
    /// Digit-leading lines without a `NN.NNN` lap-time token anywhere in the
    /// line are skipped as header artifacts; lines carrying the token must
    /// still match the row pattern.
    Lenient,
}

/// Everything the pipeline needs, decided once at startup and passed down.
/// There are no module-level knobs anywhere else.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding one text result file per event.
    pub input_dir: PathBuf,
    /// Where the season CSV lands.
    pub output_path: PathBuf,
    /// Best per-event scores kept per driver; `None` keeps everything
    /// (the drop-lowest rule disabled).
    pub keep_count: Option<NonZeroUsize>,
    pub row_validation: RowValidation,
    pub score_table: ScoreTable,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: PathBuf::from("data"),
            output_path: PathBuf::from("season.csv"),
            keep_count: NonZeroUsize::new(4),
            row_validation: RowValidation::Lenient,
            score_table: ScoreTable::default(),
        }
    }
}

impl Config {
    /// Load from a YAML file, filling unset fields with defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Resolve the effective config: `racetally.yaml` beside the working
    /// directory if present, else defaults, then positional overrides
    /// (`racetally [input_dir] [output_path]`).
    pub fn resolve(args: impl Iterator<Item = String>) -> Result<Self> {
        let yaml_path = Path::new("racetally.yaml");
        let mut config = if yaml_path.is_file() {
            Config::from_yaml_file(yaml_path)?
        } else {
            Config::default()
        };

        let mut args = args.skip(1);
        if let Some(dir) = args.next() {
            config.input_dir = PathBuf::from(dir);
        }
        if let Some(out) = args.next() {
            config.output_path = PathBuf::from(out);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_overrides_merge_with_defaults() -> Result<()> {
        let yaml = r#"
input_dir: "2025-data"
keep_count: 6
row_validation: strict
"#;
        let config: Config = serde_yaml::from_str(yaml)?;
        assert_eq!(config.input_dir, PathBuf::from("2025-data"));
        assert_eq!(config.keep_count, NonZeroUsize::new(6));
        assert_eq!(config.row_validation, RowValidation::Strict);
        // untouched fields come from Default
        assert_eq!(config.output_path, PathBuf::from("season.csv"));
        assert_eq!(config.score_table.points_for(1), 10);
        Ok(())
    }

    #[test]
    fn positional_args_override_input_and_output() -> Result<()> {
        let args = ["racetally", "2024-data", "out/season.csv"]
            .iter()
            .map(|s| s.to_string());
        let config = Config::resolve(args)?;
        assert_eq!(config.input_dir, PathBuf::from("2024-data"));
        assert_eq!(config.output_path, PathBuf::from("out/season.csv"));
        Ok(())
    }
}
