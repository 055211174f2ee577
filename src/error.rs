//! Error types for filter construction and pipeline runs.

use thiserror::Error;

/// A datetime bound that could not be turned into epoch seconds.
#[derive(Debug, Error)]
pub enum DatetimeError {
    #[error("parsing time {value:?} as \"YYYY-MM-DD HH:MM:SS\": layout mismatch")]
    Layout { value: String },

    #[error("parsing time {value:?}: second out of range")]
    SecondOutOfRange { value: String },

    #[error("parsing time {value:?}: {source}")]
    Calendar {
        value: String,
        #[source]
        source: jiff::Error,
    },
}

/// Fatal setup errors. A stage that fails with one of these is never built.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown field {0:?}")]
    UnknownField(String),

    #[error("start time is invalid: {0}")]
    InvalidStart(#[source] DatetimeError),

    #[error("end time is invalid: {0}")]
    InvalidEnd(#[source] DatetimeError),

    #[error("duplicate field {0:?}")]
    DuplicateField(String),

    #[error("empty field name at position {0}")]
    EmptyFieldName(usize),

    #[error("missing required option {option} for filter {filter}")]
    MissingOption { filter: String, option: String },

    #[error("unknown option {option} for filter {filter}")]
    UnknownOption { filter: String, option: String },

    #[error("malformed option assignment {0:?} (expected Key=Value)")]
    MalformedAssignment(String),

    #[error("unknown filter {0:?}")]
    UnknownFilter(String),
}

/// Errors surfaced by the `filter-run` binary.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_message_quotes_name() {
        let err = ConfigError::UnknownField("ts".to_string());
        assert_eq!(err.to_string(), "unknown field \"ts\"");
    }

    #[test]
    fn test_bound_errors_carry_cause() {
        let err = ConfigError::InvalidEnd(DatetimeError::Layout {
            value: "tomorrow".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.starts_with("end time is invalid: "));
        assert!(msg.contains("\"tomorrow\""));
    }

    #[test]
    fn test_pipeline_error_is_transparent_for_config() {
        let err: PipelineError = ConfigError::UnknownFilter("Nope".to_string()).into();
        assert_eq!(err.to_string(), "unknown filter \"Nope\"");
    }
}
