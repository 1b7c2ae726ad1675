//! The contextual toolbar shown while a media element is selected.

use crate::host::{Editor, EditorError, Localizer, Plugin, WidgetToolbar};
use crate::{MEDIA_ELEMENT, TOOLBAR_CONFIG};

/// Id of the media toolbar in the toolbar repository.
pub const MEDIA_TOOLBAR: &str = "media";

/// Registers the `media` widget toolbar.
///
/// Items come from `mediaEmbed.toolbar` (empty when unset), for example
/// `["mediaStyle:full", "mediaStyle:side", "|", "mediaTextAlternative"]`.
/// Registration happens in `after_init`, once every plugin had a chance to
/// register its components. Item names are not checked against the
/// component factory.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaToolbar;

impl Plugin for MediaToolbar {
    fn name(&self) -> &'static str {
        "MediaToolbar"
    }

    fn init(&self, _editor: &mut Editor) -> Result<(), EditorError> {
        Ok(())
    }

    fn after_init(&self, editor: &mut Editor) -> Result<(), EditorError> {
        let items: Vec<String> = editor.config().get_as(TOOLBAR_CONFIG)?.unwrap_or_default();
        let toolbar = WidgetToolbar {
            aria_label: editor.locale().t("Media toolbar"),
            items,
            element: MEDIA_ELEMENT.to_string(),
        };
        editor.toolbars_mut().register(MEDIA_TOOLBAR, toolbar)
    }
}
