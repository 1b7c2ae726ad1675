//! The editing half of the feature: schema, converters and the command.

use serde_json::json;

use crate::command::MediaStyleCommand;
use crate::converters::{downcast_style_attribute, upcast_style_attribute};
use crate::host::{Editor, EditorError, Plugin, Priority};
use crate::style::{BuiltinStyles, MediaStyles, StyleConfig};
use crate::{COMMAND_NAME, MEDIA_ELEMENT, MEDIA_STYLE_ATTRIBUTE, STYLES_CONFIG};

/// Styles used when `mediaEmbed.styles` is not configured.
pub const DEFAULT_STYLES: [&str; 2] = ["full", "side"];

/// Reads `mediaEmbed.styles`, declaring its default first, and resolves it
/// against the built-in tables.
pub fn configured_styles(editor: &mut Editor) -> Result<MediaStyles, EditorError> {
    editor.config_mut().define(STYLES_CONFIG, json!(DEFAULT_STYLES));
    let configured: Vec<StyleConfig> = editor
        .config()
        .get_as(STYLES_CONFIG)?
        .unwrap_or_default();
    Ok(MediaStyles::from_config(&configured, BuiltinStyles::global()))
}

/// Registers everything that makes `mediaStyle` a working model attribute.
///
/// - allows `mediaStyle` on `media` in the schema;
/// - converts the attribute to a class on the editing and data views;
/// - converts classes back while loading data;
/// - adds the `mediaStyle` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaStyleEditing;

impl Plugin for MediaStyleEditing {
    fn name(&self) -> &'static str {
        "MediaStyleEditing"
    }

    fn init(&self, editor: &mut Editor) -> Result<(), EditorError> {
        let styles = configured_styles(editor)?;
        editor.add_command(COMMAND_NAME, MediaStyleCommand::new(&styles))?;

        editor
            .model_mut()
            .schema
            .extend(MEDIA_ELEMENT, MEDIA_STYLE_ATTRIBUTE);

        let event = format!("attribute:{MEDIA_STYLE_ATTRIBUTE}:{MEDIA_ELEMENT}");
        let downcast = downcast_style_attribute(styles.clone());
        editor.editing_mut().dispatcher_mut().on(
            &event,
            MEDIA_STYLE_ATTRIBUTE,
            Priority::Normal,
            downcast.clone(),
        );
        editor
            .data_mut()
            .dispatcher_mut()
            .on(&event, MEDIA_STYLE_ATTRIBUTE, Priority::Normal, downcast);

        editor.upcast_dispatcher_mut().on(
            "element:div",
            MEDIA_STYLE_ATTRIBUTE,
            Priority::Low,
            upcast_style_attribute(&styles),
        );
        Ok(())
    }
}
