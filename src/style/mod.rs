//! Style catalog for media elements.
//!
//! This module provides the configuration-facing half of the feature:
//!
//! - [`StyleDescriptor`]: A fully resolved style (name, title, icon, class, default flag)
//! - [`StyleConfig`]: A configured style, either a bare name or a [`PartialStyle`]
//! - [`BuiltinStyles`]: The immutable built-in style and icon tables
//! - [`normalize_media_styles`]: Resolves configuration into descriptors
//! - [`MediaStyles`]: The resolved catalog shared by converters, command and UI
//! - [`StyleError`]: Errors raised when a style is requested that the catalog lacks
//!
//! Configured styles come in three shapes. A bare name picks a built-in style,
//! a partial object whose name matches a built-in customizes it field by field,
//! and anything else defines a fully custom style.

mod builtins;
mod catalog;
mod descriptor;
mod error;
mod normalize;

pub use builtins::{
    BuiltinStyles, CENTER_ICON, DEFAULT_TITLES, FULL_WIDTH_ICON, LEFT_ICON, RIGHT_ICON,
};
pub use catalog::MediaStyles;
pub use descriptor::{PartialStyle, StyleConfig, StyleDescriptor};
pub use error::StyleError;
pub use normalize::normalize_media_styles;
