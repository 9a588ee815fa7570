use std::fmt;
use thiserror::Error;

/// Failure to obtain a trustworthy set of records from the OS.
///
/// A poll either yields every row or none; partial tables are never returned.
#[derive(Debug, Error)]
pub enum RecordSourceError {
    #[error("could not run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status:  std::process::ExitStatus,
        stderr:  String,
    },

    #[error("`{command}` produced non UTF-8 output")]
    Encoding { command: String },

    #[error("malformed df row {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Conditions under which a bar cannot be laid out normally.
///
/// Neither is fatal: callers substitute a blank bar or a summary line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("filesystem {device} reports zero capacity")]
    DivisionUndefined { device: String },

    #[error("{span} has {available} columns, at least {required} needed")]
    LayoutTooNarrow { span: Span, available: usize, required: usize },
}

/// Which width a `LayoutTooNarrow` measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    /// The whole terminal row.
    Terminal,
    /// The bar region alone, borders excluded.
    Bar,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Span::Terminal => f.write_str("terminal"),
            Span::Bar      => f.write_str("bar"),
        }
    }
}
