//! Built-in styles and icons.
//!
//! Two semantic styles are provided, `full` (the default, no class) and
//! `side`, plus three formatting styles: `alignLeft`, `alignCenter` and
//! `alignRight`. Configuration may also refer to four icons by key:
//! `full`, `left`, `center` and `right`.

use once_cell::sync::Lazy;

use super::descriptor::StyleDescriptor;

/// Icon for a media spanning the full content width.
pub const FULL_WIDTH_ICON: &str = r#"<svg viewBox="0 0 20 20" xmlns="http://www.w3.org/2000/svg"><path d="M2 14.5h16V16H2v-1.5zM2 4h16v1.5H2V4zm0 3h16v6H2V7z"/></svg>"#;

/// Icon for a media floated or aligned to the left.
pub const LEFT_ICON: &str = r#"<svg viewBox="0 0 20 20" xmlns="http://www.w3.org/2000/svg"><path d="M18 4v1.5h-7.5V4H18zm0 3v1.5h-7.5V7H18zm0 3v1.5h-7.5V10H18zm0 3v1.5H2V13h16zM2 4h7v7H2V4z"/></svg>"#;

/// Icon for a centered media.
pub const CENTER_ICON: &str = r#"<svg viewBox="0 0 20 20" xmlns="http://www.w3.org/2000/svg"><path d="M2 4h16v1.5H2V4zm0 10.5h16V16H2v-1.5zM5 7h10v6H5V7z"/></svg>"#;

/// Icon for a media floated or aligned to the right.
pub const RIGHT_ICON: &str = r#"<svg viewBox="0 0 20 20" xmlns="http://www.w3.org/2000/svg"><path d="M2 4v1.5h7.5V4H2zm0 3v1.5h7.5V7H2zm0 3v1.5h7.5V10H2zm0 3v1.5h16V13H2zM18 4h-7v7h7V4z"/></svg>"#;

/// Titles of the built-in styles, eligible for translation.
pub const DEFAULT_TITLES: [&str; 5] = [
    "Full size media",
    "Side media",
    "Left aligned media",
    "Centered media",
    "Right aligned media",
];

static BUILTINS: Lazy<BuiltinStyles> = Lazy::new(BuiltinStyles::new);

/// The immutable built-in style and icon tables.
///
/// A process-wide instance is available through [`BuiltinStyles::global`];
/// the normalizer takes the tables by reference so tests can supply their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinStyles {
    styles: Vec<StyleDescriptor>,
    icons: Vec<(&'static str, &'static str)>,
}

impl BuiltinStyles {
    /// Builds the built-in tables.
    pub fn new() -> Self {
        let styles = vec![
            builtin("full", "Full size media", FULL_WIDTH_ICON, None, true),
            builtin("side", "Side media", RIGHT_ICON, Some("media-style-side"), false),
            builtin(
                "alignLeft",
                "Left aligned media",
                LEFT_ICON,
                Some("media-style-align-left"),
                false,
            ),
            builtin(
                "alignCenter",
                "Centered media",
                CENTER_ICON,
                Some("media-style-align-center"),
                false,
            ),
            builtin(
                "alignRight",
                "Right aligned media",
                RIGHT_ICON,
                Some("media-style-align-right"),
                false,
            ),
        ];

        let icons = vec![
            ("full", FULL_WIDTH_ICON),
            ("left", LEFT_ICON),
            ("right", RIGHT_ICON),
            ("center", CENTER_ICON),
        ];

        Self { styles, icons }
    }

    /// Returns the shared process-wide tables.
    pub fn global() -> &'static BuiltinStyles {
        &BUILTINS
    }

    /// Looks up a built-in style by name.
    pub fn style(&self, name: &str) -> Option<&StyleDescriptor> {
        self.styles.iter().find(|style| style.name == name)
    }

    /// Looks up a built-in icon payload by key.
    pub fn icon(&self, key: &str) -> Option<&'static str> {
        self.icons
            .iter()
            .find(|(icon_key, _)| *icon_key == key)
            .map(|(_, payload)| *payload)
    }

    /// Iterates over the built-in style names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|style| style.name.as_str())
    }
}

impl Default for BuiltinStyles {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin(
    name: &str,
    title: &str,
    icon: &str,
    class_name: Option<&str>,
    is_default: bool,
) -> StyleDescriptor {
    StyleDescriptor {
        name: name.to_string(),
        title: Some(title.to_string()),
        icon: Some(icon.to_string()),
        class_name: class_name.map(str::to_string),
        is_default,
    }
}
