//! Resolution of configured styles into descriptors.

use log::warn;

use super::builtins::BuiltinStyles;
use super::descriptor::{StyleConfig, StyleDescriptor};

/// Resolves the configured styles into complete descriptors.
///
/// The result preserves input order and has one descriptor per configured
/// entry:
///
/// - a bare name matching a built-in yields a copy of the built-in;
/// - a bare name with no built-in is reported with a warning and yields a
///   descriptor carrying only the name;
/// - a partial style whose name matches a built-in is merged field by field,
///   with present fields winning;
/// - any other partial style is taken as a custom style.
///
/// Finally, an `icon` equal to one of the built-in icon keys (`full`, `left`,
/// `center`, `right`) is replaced by that icon's markup.
///
/// # Example
///
/// ```rust
/// use mediastyle::style::{normalize_media_styles, BuiltinStyles, PartialStyle, StyleConfig};
///
/// let configured = vec![
///     StyleConfig::from("full"),
///     StyleConfig::from(PartialStyle::new("side").title("Custom")),
/// ];
/// let styles = normalize_media_styles(&configured, BuiltinStyles::global());
///
/// assert!(styles[0].is_default);
/// assert_eq!(styles[1].title.as_deref(), Some("Custom"));
/// assert_eq!(styles[1].class_name.as_deref(), Some("media-style-side"));
/// ```
pub fn normalize_media_styles(
    configured: &[StyleConfig],
    builtins: &BuiltinStyles,
) -> Vec<StyleDescriptor> {
    configured
        .iter()
        .map(|style| normalize_style(style, builtins))
        .collect()
}

fn normalize_style(style: &StyleConfig, builtins: &BuiltinStyles) -> StyleDescriptor {
    let mut descriptor = match style {
        StyleConfig::Name(name) => match builtins.style(name) {
            Some(builtin) => builtin.clone(),
            None => {
                warn!(
                    target: "mediastyle",
                    "media-style-not-found: There is no such media style of given name. {{ name: {name:?} }}"
                );
                StyleDescriptor::named(name.as_str())
            }
        },
        StyleConfig::Partial(partial) => match builtins.style(&partial.name) {
            Some(builtin) => partial.extend(builtin),
            None => partial.clone().into_descriptor(),
        },
    };

    if let Some(payload) = descriptor
        .icon
        .as_deref()
        .and_then(|key| builtins.icon(key))
    {
        descriptor.icon = Some(payload.to_string());
    }

    descriptor
}
