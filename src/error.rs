use thiserror::Error;

/// Fatal pipeline failures with a named shape, so callers and tests can match
/// on the kind instead of scraping message text. Everything else (I/O, UTF-8)
/// travels as plain `anyhow` context.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A digit-leading line did not match the expected result-row shape.
    /// Aborts the run; the input is static text, so a retry cannot help.
    #[error("malformed result row: {line:?}")]
    MalformedLine { line: String },

    /// A non-empty result file's name carries no `event <n>` token. The event
    /// id keys the season aggregate, so there is no safe fallback.
    #[error("no event id in file name {file_name:?} (expected an `event <number>` token)")]
    MissingEventId { file_name: String },
}
