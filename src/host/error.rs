//! Host errors.

use thiserror::Error;

use crate::style::StyleError;

/// Errors raised while reading editor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed.
    #[error("invalid {format} configuration: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    /// The configuration root is not an object.
    #[error("configuration root must be an object")]
    NotAnObject,
    /// A value exists at `path` but does not have the expected shape.
    #[error("invalid value at '{path}': {message}")]
    InvalidValue { path: String, message: String },
}

/// Errors raised while loading or serializing persisted content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("malformed markup: {message}")]
    Malformed { message: String },
    #[error("unexpected closing tag </{name}>")]
    UnexpectedClose { name: String },
    #[error("unclosed element <{name}>")]
    Unclosed { name: String },
    #[error("failed to serialize data: {message}")]
    Serialize { message: String },
}

/// Errors surfaced by [`Editor`](super::Editor) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("command '{name}' is not registered")]
    UnknownCommand { name: String },
    #[error("command '{name}' is already registered")]
    DuplicateCommand { name: String },
    #[error("component '{name}' is not registered")]
    UnknownComponent { name: String },
    #[error("component '{name}' is already registered")]
    DuplicateComponent { name: String },
    #[error("toolbar '{id}' is already registered")]
    DuplicateToolbar { id: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Style(#[from] StyleError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_error_is_wrapped_transparently() {
        let err: EditorError = StyleError::UnknownStyle {
            name: "sideways".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "there is no media style named 'sideways'");
    }

    #[test]
    fn test_data_error_display() {
        let err = DataError::Unclosed {
            name: "figure".to_string(),
        };
        assert_eq!(err.to_string(), "unclosed element <figure>");
    }
}
