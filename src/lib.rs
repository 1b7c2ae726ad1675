//! # mediastyle - Named styles for embedded media
//!
//! `mediastyle` lets authors give embedded media a named style (full width,
//! side, left/center/right aligned, or custom styles) in a rich-text editor.
//!
//! A style lives in two places:
//!
//! - the document model, as the `mediaStyle` attribute of a `media` element
//!   (absent for the default style);
//! - the rendered and persisted markup, as a class on the wrapping `figure`
//!   (none for the default style).
//!
//! The crate keeps both in sync and exposes a `mediaStyle` command plus one
//! toggle button per style.
//!
//! ## Modules
//!
//! - [`style`]: configuration, built-in styles and the resolved catalog
//! - [`converters`]: attribute-to-class and class-to-attribute conversion
//! - [`command`]: the `mediaStyle` command
//! - [`ui`]: `mediaStyle:<name>` buttons
//! - [`editing`], [`toolbar`], [`plugin`]: editor plugins wiring it all up
//! - [`host`]: the editor contracts the feature relies on, with an in-memory editor
//!
//! ## Example
//!
//! ```rust
//! use mediastyle::host::{EditorBuilder, ExecuteOptions};
//! use mediastyle::MediaStyle;
//!
//! let mut editor = EditorBuilder::new().plugin(MediaStyle).build().unwrap();
//! editor
//!     .set_data(r#"<figure class="media"><div data-oembed-url="https://example.com/v"></div></figure>"#)
//!     .unwrap();
//!
//! let media = editor.model().document.elements_named("media")[0];
//! editor.select(Some(media));
//! editor.execute("mediaStyle", &ExecuteOptions::value("side")).unwrap();
//!
//! assert_eq!(
//!     editor.get_data().unwrap(),
//!     r#"<figure class="media media-style-side"><div data-oembed-url="https://example.com/v"></div></figure>"#
//! );
//! ```
//!
//! ## Configuration
//!
//! Styles are read from `mediaEmbed.styles` (default `["full", "side"]`).
//! Each entry is a built-in name or an object:
//!
//! ```yaml
//! mediaEmbed:
//!   styles:
//!     - full
//!     - name: side
//!       title: To the side
//!     - name: banner
//!       title: Banner
//!       icon: center
//!       className: media-banner
//!   toolbar: ["mediaStyle:full", "mediaStyle:side", "mediaStyle:banner"]
//! ```

pub mod command;
pub mod converters;
pub mod editing;
pub mod host;
pub mod plugin;
pub mod style;
pub mod toolbar;
pub mod ui;

pub use command::MediaStyleCommand;
pub use converters::{downcast_style_attribute, upcast_style_attribute};
pub use editing::MediaStyleEditing;
pub use host::{ConfigError, DataError, EditorError};
pub use plugin::MediaStyle;
pub use style::{MediaStyles, StyleConfig, StyleDescriptor, StyleError};
pub use toolbar::MediaToolbar;
pub use ui::MediaStyleUi;

/// Model element the styles apply to.
pub const MEDIA_ELEMENT: &str = "media";

/// Model attribute holding the style name.
pub const MEDIA_STYLE_ATTRIBUTE: &str = "mediaStyle";

/// Model container whose media are never styled.
pub const SPOILER_CONTENT: &str = "spoilerContent";

/// Name of the style command.
pub const COMMAND_NAME: &str = "mediaStyle";

/// Configuration path of the style list.
pub const STYLES_CONFIG: &str = "mediaEmbed.styles";

/// Configuration path of the media toolbar items.
pub const TOOLBAR_CONFIG: &str = "mediaEmbed.toolbar";

/// Prefix of the style button component names.
pub const COMPONENT_PREFIX: &str = "mediaStyle:";

/// Returns the component name of the button for `style`.
pub fn component_name(style: &str) -> String {
    format!("{COMPONENT_PREFIX}{style}")
}
