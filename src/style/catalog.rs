//! The resolved style catalog.

use std::rc::Rc;

use super::builtins::BuiltinStyles;
use super::descriptor::{StyleConfig, StyleDescriptor};
use super::normalize::normalize_media_styles;

/// A resolved, read-only list of media styles.
///
/// Cloning is cheap: all clones share the same descriptors. One catalog is
/// built per editor and handed to the converters, the command and the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaStyles {
    styles: Rc<[StyleDescriptor]>,
}

impl MediaStyles {
    /// Wraps already resolved descriptors.
    pub fn new(styles: Vec<StyleDescriptor>) -> Self {
        Self {
            styles: styles.into(),
        }
    }

    /// Normalizes configuration against the given built-in tables.
    pub fn from_config(configured: &[StyleConfig], builtins: &BuiltinStyles) -> Self {
        Self::new(normalize_media_styles(configured, builtins))
    }

    /// Finds the first style with the given name.
    pub fn find(&self, name: &str) -> Option<&StyleDescriptor> {
        self.styles.iter().find(|style| style.name == name)
    }

    /// Returns the default style, if any. The last default wins.
    pub fn default_style(&self) -> Option<&StyleDescriptor> {
        self.styles.iter().rev().find(|style| style.is_default)
    }

    /// Iterates over the styles that are represented by a class.
    pub fn non_default(&self) -> impl Iterator<Item = &StyleDescriptor> {
        self.styles.iter().filter(|style| !style.is_default)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDescriptor> {
        self.styles.iter()
    }

    pub fn as_slice(&self) -> &[StyleDescriptor] {
        &self.styles
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl From<Vec<StyleDescriptor>> for MediaStyles {
    fn from(styles: Vec<StyleDescriptor>) -> Self {
        Self::new(styles)
    }
}
