//! The editor: plugin lifecycle, model, views and the glue between them.
//!
//! An [`Editor`] owns one [`Model`] and two rendered trees. The *editing*
//! view is what the user interacts with; the *data* view is what
//! [`Editor::get_data`] serializes. Both are kept in sync with the model by
//! their own [`DowncastDispatcher`], so a feature registers its model-to-view
//! stages on both.
//!
//! Every model change block is followed by a flush: the recorded changes are
//! converted into both views in order, then every command refreshes its
//! state.
//!
//! # Example
//!
//! ```rust
//! use mediastyle::host::{EditorBuilder, ModelReader};
//!
//! let mut editor = EditorBuilder::new().build().unwrap();
//! editor
//!     .set_data(r#"<figure class="media"><div data-oembed-url="https://example.com/v"></div></figure>"#)
//!     .unwrap();
//!
//! let media = editor.model().document.elements_named("media");
//! assert_eq!(editor.model().document.attribute(media[0], "url"), Some("https://example.com/v"));
//! ```

use std::collections::HashSet;

use log::{debug, trace};
use serde_json::Value;

use super::command::{Command, CommandCollection, ExecuteOptions};
use super::config::EditorConfig;
use super::conversion::{Consumables, ConversionReport, DowncastApi, DowncastDispatcher, UpcastDispatcher};
use super::data::{self, MEDIA_CLASS, MEDIA_URL_ATTRIBUTE, SPOILER_CLASS};
use super::error::EditorError;
use super::locale::Locale;
use super::model::{Document, Model, ModelChange, ModelReader, ModelWriter, NodeId, Writer};
use super::ui::{ButtonView, ComponentContext, ComponentFactory, ToolbarRepository, WidgetToolbar};
use super::view::{Mapper, ViewId, ViewReader, ViewTree, ViewWriter};

/// An editor feature.
///
/// Plugins are initialized in dependency order: everything returned by
/// [`Plugin::requires`] is initialized before the plugin itself. A plugin
/// name is initialized at most once per editor. All `init` calls complete
/// before the first `after_init` call.
pub trait Plugin {
    fn name(&self) -> &'static str;

    fn requires(&self) -> Vec<Box<dyn Plugin>> {
        Vec::new()
    }

    fn init(&self, editor: &mut Editor) -> Result<(), EditorError>;

    fn after_init(&self, _editor: &mut Editor) -> Result<(), EditorError> {
        Ok(())
    }
}

/// Builder for an [`Editor`].
#[derive(Default)]
pub struct EditorBuilder {
    config: Value,
    locale: Locale,
    plugins: Vec<Box<dyn Plugin>>,
}

impl EditorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration object. Defaults to an empty configuration.
    pub fn config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Creates the editor and runs the plugin lifecycle.
    ///
    /// # Errors
    ///
    /// Fails on invalid configuration or when any plugin fails to initialize.
    pub fn build(self) -> Result<Editor, EditorError> {
        let config = EditorConfig::from_value(self.config)?;
        let mut editor = Editor::new(config, self.locale);

        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for plugin in self.plugins {
            resolve(plugin, &mut seen, &mut ordered);
        }

        for plugin in &ordered {
            debug!(target: "mediastyle", "initializing plugin {}", plugin.name());
            plugin.init(&mut editor)?;
        }
        for plugin in &ordered {
            plugin.after_init(&mut editor)?;
        }

        editor.plugins = ordered.iter().map(|plugin| plugin.name()).collect();
        editor.flush_changes();
        Ok(editor)
    }
}

fn resolve(
    plugin: Box<dyn Plugin>,
    seen: &mut HashSet<&'static str>,
    ordered: &mut Vec<Box<dyn Plugin>>,
) {
    if !seen.insert(plugin.name()) {
        return;
    }
    for dependency in plugin.requires() {
        resolve(dependency, seen, ordered);
    }
    ordered.push(plugin);
}

/// A rendered tree kept in sync with the model.
#[derive(Debug, Default)]
pub struct ViewController {
    view: ViewTree,
    mapper: Mapper,
    dispatcher: DowncastDispatcher,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewTree {
        &self.view
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// The model-to-view stages of this view.
    pub fn dispatcher_mut(&mut self) -> &mut DowncastDispatcher {
        &mut self.dispatcher
    }

    /// Returns the view element rendering `node`.
    pub fn view_element(&self, node: NodeId) -> Option<ViewId> {
        self.mapper.to_view_element(node)
    }

    /// Returns the classes of the view element rendering `node`.
    pub fn classes_of(&self, node: NodeId) -> &[String] {
        match self.mapper.to_view_element(node) {
            Some(element) => self.view.classes(element),
            None => &[],
        }
    }

    /// Drops the rendered content. Registered stages are kept.
    fn reset(&mut self) {
        self.view = ViewTree::new();
        self.mapper = Mapper::new();
    }

    fn apply(&mut self, change: &ModelChange, document: &Document) -> Option<ConversionReport> {
        match change {
            ModelChange::Insert { node } => {
                self.render_insert(*node, document);
                None
            }
            ModelChange::Attribute(change) => {
                let element_name = document.name(change.item)?;
                let mut consumables = Consumables::new();
                let mut api = DowncastApi {
                    consumables: &mut consumables,
                    model: document,
                    mapper: &self.mapper,
                    writer: &mut self.view,
                };
                Some(self.dispatcher.convert_attribute(element_name, change, &mut api))
            }
        }
    }

    fn render_insert(&mut self, node: NodeId, document: &Document) {
        let parent = document
            .parent(node)
            .and_then(|parent| self.mapper.to_view_element(parent))
            .unwrap_or_else(|| self.view.root());

        let element = match document.name(node) {
            Some("media") => {
                let figure = self.view.create_element("figure", parent);
                self.view.add_class(MEDIA_CLASS, figure);
                let embed = self.view.create_element("div", figure);
                if let Some(url) = document.attribute(node, "url") {
                    self.view.set_attribute(embed, MEDIA_URL_ATTRIBUTE, url);
                }
                figure
            }
            Some("spoilerContent") => {
                let container = self.view.create_element("div", parent);
                self.view.add_class(SPOILER_CLASS, container);
                container
            }
            Some(name) => self.view.create_element(name, parent),
            None => return,
        };
        self.mapper.bind(node, element);
    }
}

/// A headless editor instance.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    locale: Locale,
    model: Model,
    editing: ViewController,
    data: ViewController,
    upcast: UpcastDispatcher,
    commands: CommandCollection,
    components: ComponentFactory,
    toolbars: ToolbarRepository,
    plugins: Vec<&'static str>,
}

impl Editor {
    /// Creates an editor without plugins. See [`EditorBuilder`].
    pub fn new(config: EditorConfig, locale: Locale) -> Self {
        let mut upcast = UpcastDispatcher::new();
        data::register_host_upcasts(&mut upcast);

        Self {
            config,
            locale,
            model: Model::default(),
            editing: ViewController::new(),
            data: ViewController::new(),
            upcast,
            commands: CommandCollection::new(),
            components: ComponentFactory::new(),
            toolbars: ToolbarRepository::new(),
            plugins: Vec::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Direct model access. Changes made through it are converted on the
    /// next flush.
    pub fn model_mut(&mut self) -> &mut Model {
        &mut self.model
    }

    pub fn editing(&self) -> &ViewController {
        &self.editing
    }

    pub fn editing_mut(&mut self) -> &mut ViewController {
        &mut self.editing
    }

    pub fn data(&self) -> &ViewController {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut ViewController {
        &mut self.data
    }

    pub fn upcast_dispatcher_mut(&mut self) -> &mut UpcastDispatcher {
        &mut self.upcast
    }

    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }

    pub fn command(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name)
    }

    pub fn components(&self) -> &ComponentFactory {
        &self.components
    }

    pub fn components_mut(&mut self) -> &mut ComponentFactory {
        &mut self.components
    }

    pub fn toolbars(&self) -> &ToolbarRepository {
        &self.toolbars
    }

    pub fn toolbars_mut(&mut self) -> &mut ToolbarRepository {
        &mut self.toolbars
    }

    /// Returns `true` if a plugin with this name was initialized.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|plugin| *plugin == name)
    }

    /// Registers a command and computes its initial state.
    pub fn add_command(&mut self, name: &str, command: impl Command + 'static) -> Result<(), EditorError> {
        self.commands.add(name, Box::new(command))?;
        if let Some(command) = self.commands.get_mut(name) {
            command.refresh(&self.model);
        }
        Ok(())
    }

    /// Executes a registered command.
    ///
    /// Executing a disabled command does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownCommand`] for an unregistered name, or
    /// whatever the command itself rejects.
    pub fn execute(&mut self, name: &str, options: &ExecuteOptions) -> Result<(), EditorError> {
        let command = self
            .commands
            .get_mut(name)
            .ok_or_else(|| EditorError::UnknownCommand {
                name: name.to_string(),
            })?;

        if !command.state().is_enabled {
            debug!(target: "mediastyle", "command '{name}' is disabled, ignoring execute");
            return Ok(());
        }

        command.execute(&mut self.model, options)?;
        self.flush_changes();
        Ok(())
    }

    /// Runs a model change block and flushes it.
    pub fn change<R>(&mut self, f: impl FnOnce(&mut Writer<'_>) -> R) -> R {
        let result = self.model.document.change(f);
        self.flush_changes();
        result
    }

    /// Inserts a media element with the given URL under `parent`.
    pub fn insert_media(&mut self, parent: NodeId, url: &str) -> NodeId {
        self.change(|writer| {
            let media = writer.insert_element("media", parent);
            writer.set_attribute("url", url, media);
            media
        })
    }

    /// Selects a single element (or nothing) and refreshes commands.
    pub fn select(&mut self, node: Option<NodeId>) {
        self.model.document.set_selection(node);
        self.commands.refresh_all(&self.model);
    }

    /// Replaces the content with parsed markup.
    ///
    /// The selection is cleared.
    pub fn set_data(&mut self, markup: &str) -> Result<(), EditorError> {
        let parsed = data::parse_markup(markup)?;

        self.model.document = Document::new();
        self.editing.reset();
        self.data.reset();

        let Model { document, schema } = &mut self.model;
        let schema = &*schema;
        let upcast = &self.upcast;
        let root = document.root();
        document.change(|writer| data::upcast_tree(&parsed, upcast, schema, writer, root));

        self.flush_changes();
        Ok(())
    }

    /// Serializes the data view.
    pub fn get_data(&self) -> Result<String, EditorError> {
        Ok(data::serialize(self.data.view())?)
    }

    /// Builds a fresh instance of a registered UI component.
    pub fn create_component(&mut self, name: &str) -> Result<ButtonView, EditorError> {
        let mut context = ComponentContext {
            locale: &self.locale,
            commands: &mut self.commands,
        };
        self.components.create(name, &mut context)
    }

    /// Presses a button: runs its command unless the button is disabled.
    pub fn click(&mut self, button: &ButtonView) -> Result<(), EditorError> {
        if !button.is_enabled() {
            return Ok(());
        }
        match button.action() {
            Some(action) => self.execute(&action.command, &action.options),
            None => Ok(()),
        }
    }

    /// Returns the toolbar for the selected element, if one is registered.
    pub fn active_toolbar(&self) -> Option<(&str, &WidgetToolbar)> {
        let selected = self.model.document.selected_element()?;
        let name = self.model.document.name(selected)?;
        self.toolbars.for_element(name)
    }

    /// Converts pending model changes into both views and refreshes commands.
    pub fn flush_changes(&mut self) {
        let changes = self.model.document.take_changes();
        for change in &changes {
            let editing = self.editing.apply(change, &self.model.document);
            let data = self.data.apply(change, &self.model.document);
            if let (Some(editing), Some(data)) = (editing, data) {
                trace!(
                    target: "mediastyle",
                    "converted {change:?}: editing={:?} data={:?}",
                    editing.iter().collect::<Vec<_>>(),
                    data.iter().collect::<Vec<_>>()
                );
            }
        }
        self.commands.refresh_all(&self.model);
    }
}
