//! Style descriptors and their configuration forms.

use serde::{Deserialize, Serialize};

/// A fully resolved media style.
///
/// The `name` is stored as the value of the `mediaStyle` model attribute and
/// suffixes the UI control identifier (`mediaStyle:{name}`). The `class_name`
/// is the CSS class put on the rendered media wrapper.
///
/// A default style (`is_default`) is represented by the *absence* of the
/// model attribute and never contributes a class to the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDescriptor {
    /// Unique style identifier.
    pub name: String,
    /// Human-readable label, translated when it matches a built-in title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Icon markup, or the key of a built-in icon before normalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// CSS class applied to the rendered element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Whether this style is in effect when no attribute is set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_default: bool,
}

impl StyleDescriptor {
    /// Creates a bare descriptor carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            icon: None,
            class_name: None,
            is_default: false,
        }
    }

    /// Returns the class this style contributes to the rendered tree.
    ///
    /// Default styles never contribute a class, even when one is configured.
    pub fn view_class(&self) -> Option<&str> {
        if self.is_default {
            None
        } else {
            self.class_name.as_deref()
        }
    }
}

/// A style object as written in configuration.
///
/// Every field but `name` is optional. When the name matches a built-in style,
/// present fields override the built-in and absent ones are inherited from it.
///
/// # Example
///
/// ```rust
/// use mediastyle::style::PartialStyle;
///
/// let custom = PartialStyle::new("side")
///     .title("To the side")
///     .class_name("custom-side-media");
/// assert_eq!(custom.icon, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialStyle {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

impl PartialStyle {
    /// Creates a partial style with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn default_style(mut self, is_default: bool) -> Self {
        self.is_default = Some(is_default);
        self
    }

    /// Produces a new descriptor from `base` with every present field overridden.
    ///
    /// Neither `self` nor `base` is modified.
    pub fn extend(&self, base: &StyleDescriptor) -> StyleDescriptor {
        StyleDescriptor {
            name: self.name.clone(),
            title: self.title.clone().or_else(|| base.title.clone()),
            icon: self.icon.clone().or_else(|| base.icon.clone()),
            class_name: self.class_name.clone().or_else(|| base.class_name.clone()),
            is_default: self.is_default.unwrap_or(base.is_default),
        }
    }

    /// Converts a fully custom style into a descriptor.
    pub fn into_descriptor(self) -> StyleDescriptor {
        StyleDescriptor {
            name: self.name,
            title: self.title,
            icon: self.icon,
            class_name: self.class_name,
            is_default: self.is_default.unwrap_or(false),
        }
    }
}

/// One entry of the `mediaEmbed.styles` configuration.
///
/// Deserializes from either a string or an object:
///
/// ```rust
/// use mediastyle::style::StyleConfig;
///
/// let styles: Vec<StyleConfig> =
///     serde_json::from_str(r#"["full", { "name": "side", "icon": "left" }]"#).unwrap();
/// assert_eq!(styles[0], StyleConfig::from("full"));
/// assert!(matches!(styles[1], StyleConfig::Partial(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleConfig {
    /// Reference to a built-in style by name.
    Name(String),
    /// A customized built-in or a fully custom style.
    Partial(PartialStyle),
}

impl From<&str> for StyleConfig {
    fn from(name: &str) -> Self {
        StyleConfig::Name(name.to_string())
    }
}

impl From<String> for StyleConfig {
    fn from(name: String) -> Self {
        StyleConfig::Name(name)
    }
}

impl From<PartialStyle> for StyleConfig {
    fn from(partial: PartialStyle) -> Self {
        StyleConfig::Partial(partial)
    }
}
