//! Style lookup errors.

use thiserror::Error;

/// Error returned when a style command cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The requested style is not part of the command's catalog.
    #[error("there is no media style named '{name}'")]
    UnknownStyle { name: String },
    /// The command was executed without a style name.
    #[error("the media style command requires a style value")]
    MissingValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_style_error_display() {
        let err = StyleError::UnknownStyle {
            name: "sideways".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sideways"));
        assert!(msg.contains("no media style"));
    }

    #[test]
    fn test_missing_value_error_display() {
        let msg = StyleError::MissingValue.to_string();
        assert!(msg.contains("requires a style value"));
    }
}
