//! Error type shared by the input readers, the planner configuration and the CLI.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChromLocError {
    #[error("cannot read {}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed row in {source_name} line {line}: {message}")]
    MalformedInputRow {
        source_name: String,
        line: usize,
        message: String,
    },

    #[error("unknown chromosome '{name}' in {source_name} line {line}")]
    UnknownChromosome {
        name: String,
        source_name: String,
        line: usize,
    },

    #[error(
        "feature '{feature}' in {source_name} line {line} ends at {end}, beyond the length of chromosome '{chromosome}' ({length})"
    )]
    FeatureOutOfBounds {
        feature: String,
        chromosome: String,
        end: u64,
        length: u64,
        source_name: String,
        line: usize,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ChromLocError {
    pub fn malformed<S: Into<String>, M: Into<String>>(
        source_name: S,
        line: usize,
        message: M,
    ) -> Self {
        Self::MalformedInputRow {
            source_name: source_name.into(),
            line,
            message: message.into(),
        }
    }

    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChromLocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_names_source_and_line() {
        let err = ChromLocError::malformed("genes.txt", 12, "expected 5 columns, found 3");
        let text = err.to_string();
        assert!(text.contains("genes.txt"));
        assert!(text.contains("line 12"));
        assert!(text.contains("expected 5 columns"));
    }
}
