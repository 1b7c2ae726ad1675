//! The media style feature as a single plugin.

use crate::editing::MediaStyleEditing;
use crate::host::{Editor, EditorError, Plugin};
use crate::ui::MediaStyleUi;

/// Loads [`MediaStyleEditing`] and [`MediaStyleUi`].
///
/// # Example
///
/// ```rust
/// use mediastyle::host::EditorBuilder;
/// use mediastyle::MediaStyle;
///
/// let editor = EditorBuilder::new().plugin(MediaStyle).build().unwrap();
///
/// assert!(editor.has_plugin("MediaStyleEditing"));
/// assert!(editor.components().has("mediaStyle:side"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaStyle;

impl Plugin for MediaStyle {
    fn name(&self) -> &'static str {
        "MediaStyle"
    }

    fn requires(&self) -> Vec<Box<dyn Plugin>> {
        vec![Box::new(MediaStyleEditing), Box::new(MediaStyleUi)]
    }

    fn init(&self, _editor: &mut Editor) -> Result<(), EditorError> {
        Ok(())
    }
}
