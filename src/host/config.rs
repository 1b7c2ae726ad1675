//! Editor configuration.
//!
//! Configuration is a tree of JSON values addressed with dotted paths such as
//! `mediaEmbed.styles`. Features declare their defaults with
//! [`EditorConfig::define`], which never overrides a value the integrator
//! already provided, and read them back with [`EditorConfig::get_as`].
//!
//! # Example
//!
//! ```rust
//! use mediastyle::host::EditorConfig;
//! use serde_json::json;
//!
//! let mut config = EditorConfig::from_value(json!({
//!     "mediaEmbed": { "toolbar": ["mediaStyle:side"] }
//! })).unwrap();
//! config.define("mediaEmbed.styles", json!(["full", "side"]));
//!
//! let styles: Vec<String> = config.get_as("mediaEmbed.styles").unwrap().unwrap();
//! assert_eq!(styles, vec!["full", "side"]);
//! ```

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::ConfigError;

/// Dotted-path configuration reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorConfig {
    root: Map<String, Value>,
}

impl EditorConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a JSON object. `null` is treated as an empty configuration.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            Value::Null => Ok(Self::new()),
            _ => Err(ConfigError::NotAnObject),
        }
    }

    /// Parses JSON configuration text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            format: "JSON",
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Parses YAML configuration text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(text).map_err(|e| ConfigError::Parse {
            format: "YAML",
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Returns the value at `path`, if present and not `null`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        (!current.is_null()).then_some(current)
    }

    /// Deserializes the value at `path`.
    ///
    /// Returns `Ok(None)` when the path is absent.
    pub fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ConfigError> {
        self.get(path)
            .map(|value| {
                T::deserialize(value).map_err(|e| ConfigError::InvalidValue {
                    path: path.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()
    }

    /// Sets `path` to `value`, creating intermediate objects.
    ///
    /// Nothing is written when an intermediate segment holds a non-object value.
    pub fn set(&mut self, path: &str, value: Value) {
        if let Some(slot) = self.slot(path) {
            *slot = value;
        }
    }

    /// Sets `path` to `default` unless a value is already present.
    pub fn define(&mut self, path: &str, default: Value) {
        if let Some(slot) = self.slot(path) {
            if slot.is_null() {
                *slot = default;
            }
        }
    }

    fn slot(&mut self, path: &str) -> Option<&mut Value> {
        let mut segments = path.split('.');
        let last = segments.next_back()?;
        let mut map = &mut self.root;
        for segment in segments {
            map = map
                .entry(segment)
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()?;
        }
        Some(map.entry(last).or_insert(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_define_does_not_override() {
        let mut config = EditorConfig::from_value(json!({
            "mediaEmbed": { "styles": ["alignLeft"] }
        }))
        .unwrap();

        config.define("mediaEmbed.styles", json!(["full", "side"]));

        assert_eq!(config.get("mediaEmbed.styles"), Some(&json!(["alignLeft"])));
    }

    #[test]
    fn test_define_creates_missing_path() {
        let mut config = EditorConfig::new();
        config.define("mediaEmbed.styles", json!(["full"]));

        assert_eq!(config.get("mediaEmbed"), Some(&json!({ "styles": ["full"] })));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let mut config = EditorConfig::from_value(json!({ "mediaEmbed": { "toolbar": null } }))
            .unwrap();
        assert_eq!(config.get("mediaEmbed.toolbar"), None);

        config.define("mediaEmbed.toolbar", json!([]));
        assert_eq!(config.get("mediaEmbed.toolbar"), Some(&json!([])));
    }

    #[test]
    fn test_set_through_scalar_is_ignored() {
        let mut config = EditorConfig::from_value(json!({ "mediaEmbed": 3 })).unwrap();
        config.set("mediaEmbed.styles", json!([]));
        assert_eq!(config.get("mediaEmbed"), Some(&json!(3)));
    }

    #[test]
    fn test_get_as_reports_path_on_shape_mismatch() {
        let config = EditorConfig::from_value(json!({ "mediaEmbed": { "toolbar": 3 } })).unwrap();

        let err = config
            .get_as::<Vec<String>>("mediaEmbed.toolbar")
            .unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { ref path, .. } if path == "mediaEmbed.toolbar"));
    }

    #[test]
    fn test_get_as_absent_path() {
        let config = EditorConfig::new();
        assert_eq!(config.get_as::<Vec<String>>("mediaEmbed.toolbar"), Ok(None));
    }

    #[test]
    fn test_root_must_be_object() {
        assert_eq!(
            EditorConfig::from_value(json!(["full"])),
            Err(ConfigError::NotAnObject)
        );
    }

    #[test]
    fn test_yaml_configuration() {
        let config = EditorConfig::from_yaml_str(
            "mediaEmbed:\n  styles:\n    - full\n    - name: side\n      icon: left\n",
        )
        .unwrap();

        assert_eq!(
            config.get("mediaEmbed.styles"),
            Some(&json!(["full", { "name": "side", "icon": "left" }]))
        );
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = EditorConfig::from_json_str("{ mediaEmbed").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "JSON", .. }));
    }
}
