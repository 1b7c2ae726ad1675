//! The `mediaStyle` command.

use std::collections::HashMap;

use log::debug;

use crate::host::{
    Command, CommandState, Document, EditorError, ExecuteOptions, Model, ModelReader, ModelWriter,
    NodeId, ObservableState, StateListener,
};
use crate::style::{MediaStyles, StyleDescriptor, StyleError};
use crate::{MEDIA_ELEMENT, MEDIA_STYLE_ATTRIBUTE};

/// Applies a style to the selected media element.
///
/// The command is enabled only while a single media element is selected.
/// Its value is the name of the style in effect on that element:
///
/// | `mediaStyle` attribute     | value                        |
/// |----------------------------|------------------------------|
/// | absent                     | the default style, if any    |
/// | a style of this catalog    | that style                   |
/// | anything else              | `None`                       |
///
/// Executing with a default style removes the attribute, any other style
/// sets it. Each execution performs exactly one attribute mutation.
///
/// # Example
///
/// ```rust
/// use mediastyle::command::MediaStyleCommand;
/// use mediastyle::host::{Command, ExecuteOptions, Model, ModelReader, ModelWriter};
/// use mediastyle::style::{BuiltinStyles, MediaStyles};
///
/// let styles = MediaStyles::from_config(&["full".into(), "side".into()], BuiltinStyles::global());
/// let mut command = MediaStyleCommand::new(&styles);
/// let mut model = Model::default();
/// let root = model.document.root();
/// let media = model.document.change(|writer| writer.insert_element("media", root));
/// model.document.set_selection(Some(media));
///
/// command.refresh(&model);
/// assert_eq!(command.value(), Some("full"));
///
/// command.execute(&mut model, &ExecuteOptions::value("side")).unwrap();
/// command.refresh(&model);
/// assert_eq!(command.value(), Some("side"));
/// assert_eq!(model.document.attribute(media, "mediaStyle"), Some("side"));
/// ```
#[derive(Debug)]
pub struct MediaStyleCommand {
    styles: HashMap<String, StyleDescriptor>,
    default_style: Option<String>,
    state: ObservableState,
}

impl MediaStyleCommand {
    /// Creates the command for a catalog.
    ///
    /// With duplicate names the last descriptor is kept; with several
    /// default styles the last one is the default.
    pub fn new(styles: &MediaStyles) -> Self {
        let mut by_name = HashMap::new();
        let mut default_style = None;
        for style in styles.iter() {
            if style.is_default {
                default_style = Some(style.name.clone());
            }
            by_name.insert(style.name.clone(), style.clone());
        }

        Self {
            styles: by_name,
            default_style,
            state: ObservableState::new(),
        }
    }

    /// Name of the default style, if the catalog has one.
    pub fn default_style(&self) -> Option<&str> {
        self.default_style.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.state.get().is_enabled
    }

    pub fn value(&self) -> Option<&str> {
        self.state.get().value.as_deref()
    }

    fn selected_media(document: &Document) -> Option<NodeId> {
        document
            .selected_element()
            .filter(|node| document.name(*node) == Some(MEDIA_ELEMENT))
    }
}

impl Command for MediaStyleCommand {
    fn refresh(&mut self, model: &Model) {
        let document = &model.document;
        let next = match Self::selected_media(document) {
            None => CommandState::disabled(),
            Some(media) => {
                let value = match document.attribute(media, MEDIA_STYLE_ATTRIBUTE) {
                    Some(name) => self.styles.contains_key(name).then(|| name.to_string()),
                    None => self.default_style.clone(),
                };
                CommandState::enabled(value)
            }
        };
        self.state.set(next);
    }

    /// # Errors
    ///
    /// Returns [`StyleError::MissingValue`] without a style name and
    /// [`StyleError::UnknownStyle`] for a name outside the catalog. The model
    /// is left untouched in both cases.
    fn execute(&mut self, model: &mut Model, options: &ExecuteOptions) -> Result<(), EditorError> {
        let name = options.value.as_deref().ok_or(StyleError::MissingValue)?;
        let style = self
            .styles
            .get(name)
            .ok_or_else(|| StyleError::UnknownStyle {
                name: name.to_string(),
            })?;
        let is_default = style.is_default;

        let Some(media) = Self::selected_media(&model.document) else {
            debug!(target: "mediastyle", "no media selected, ignoring style '{name}'");
            return Ok(());
        };

        model.document.change(|writer| {
            if is_default {
                writer.remove_attribute(MEDIA_STYLE_ATTRIBUTE, media);
            } else {
                writer.set_attribute(MEDIA_STYLE_ATTRIBUTE, name, media);
            }
        });
        debug!(target: "mediastyle", "applied media style '{name}' to {media:?}");
        Ok(())
    }

    fn state(&self) -> &CommandState {
        self.state.get()
    }

    fn subscribe(&mut self, listener: StateListener) {
        self.state.subscribe(listener);
    }
}
