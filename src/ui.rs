//! Toolbar controls for media styles.
//!
//! [`MediaStyleUi`] registers one component per configured style in the
//! editor's component factory. Components are named `mediaStyle:<name>` and
//! built lazily: every [`Editor::create_component`] call returns a fresh
//! button bound to the `mediaStyle` command.
//!
//! # Button state
//!
//! | Property        | Source                                   |
//! |-----------------|------------------------------------------|
//! | `label`         | the style title, translated if built-in  |
//! | `icon`          | the resolved icon markup                 |
//! | `tooltip`       | always on                                |
//! | `is_toggleable` | always on                                |
//! | `is_enabled`    | the command's `is_enabled`               |
//! | `is_on`         | the command's value equals the style     |
//!
//! Pressing a button executes `mediaStyle` with the style name.
//!
//! # Titles
//!
//! Only the five built-in titles ([`DEFAULT_TITLES`]) are translated. A
//! custom title is shown as configured, even when it happens to be a
//! translation key elsewhere.
//!
//! [`Editor::create_component`]: crate::host::Editor::create_component

use std::collections::HashMap;

use crate::editing::configured_styles;
use crate::host::{
    ButtonView, CommandInvocation, Editor, EditorError, ExecuteOptions, Localizer, Plugin,
};
use crate::style::{StyleDescriptor, DEFAULT_TITLES};
use crate::{component_name, COMMAND_NAME};

/// Maps each built-in title to its translation.
pub fn localized_default_titles(localizer: &dyn Localizer) -> HashMap<&'static str, String> {
    DEFAULT_TITLES
        .iter()
        .map(|title| (*title, localizer.t(title)))
        .collect()
}

/// Returns copies of `styles` with built-in titles replaced by their translation.
pub fn translate_styles(
    styles: &[StyleDescriptor],
    titles: &HashMap<&'static str, String>,
) -> Vec<StyleDescriptor> {
    styles
        .iter()
        .map(|style| {
            let mut style = style.clone();
            if let Some(translated) = style.title.as_deref().and_then(|title| titles.get(title)) {
                style.title = Some(translated.clone());
            }
            style
        })
        .collect()
}

/// Registers the `mediaStyle:<name>` buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaStyleUi;

impl Plugin for MediaStyleUi {
    fn name(&self) -> &'static str {
        "MediaStyleUI"
    }

    fn init(&self, editor: &mut Editor) -> Result<(), EditorError> {
        let styles = configured_styles(editor)?;
        let titles = localized_default_titles(editor.locale());

        for style in translate_styles(styles.as_slice(), &titles) {
            let name = component_name(&style.name);
            editor
                .components_mut()
                .add(&name, move |context| create_button(&style, context.commands))?;
        }
        Ok(())
    }
}

fn create_button(
    style: &StyleDescriptor,
    commands: &mut crate::host::CommandCollection,
) -> Result<ButtonView, EditorError> {
    let command = commands
        .get_mut(COMMAND_NAME)
        .ok_or_else(|| EditorError::UnknownCommand {
            name: COMMAND_NAME.to_string(),
        })?;

    let mut button = ButtonView::new();
    button.set(style.title.clone(), style.icon.clone(), true, true);

    let name = style.name.clone();
    button.bind_to_command(command, move |state| state.value.as_deref() == Some(name.as_str()));
    button.on_execute(CommandInvocation::new(
        COMMAND_NAME,
        ExecuteOptions::value(style.name.as_str()),
    ));
    Ok(button)
}
