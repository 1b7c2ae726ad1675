//! UI components: buttons, the component factory and widget toolbars.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::command::{Command, CommandCollection, CommandState, ExecuteOptions};
use super::error::EditorError;
use super::locale::Locale;

/// Display properties of a button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonProps {
    pub label: Option<String>,
    pub icon: Option<String>,
    pub tooltip: bool,
    pub is_toggleable: bool,
    pub is_enabled: bool,
    pub is_on: bool,
}

/// A command to run when a control is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub command: String,
    pub options: ExecuteOptions,
}

impl CommandInvocation {
    pub fn new(command: impl Into<String>, options: ExecuteOptions) -> Self {
        Self {
            command: command.into(),
            options,
        }
    }
}

/// A (possibly togglable) button.
///
/// Clones share the same properties. Bindings established with
/// [`ButtonView::bind_to_command`] keep `is_enabled` and `is_on` in sync with
/// the command state for as long as the button is alive.
#[derive(Debug, Clone, Default)]
pub struct ButtonView {
    props: Rc<RefCell<ButtonProps>>,
    action: Option<CommandInvocation>,
}

impl ButtonView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets label, icon, tooltip and toggle behaviour at once.
    pub fn set(&self, label: Option<String>, icon: Option<String>, tooltip: bool, toggleable: bool) {
        let mut props = self.props.borrow_mut();
        props.label = label;
        props.icon = icon;
        props.tooltip = tooltip;
        props.is_toggleable = toggleable;
    }

    /// Binds `is_enabled` to the command and `is_on` to `is_on(state)`.
    pub fn bind_to_command<F>(&self, command: &mut dyn Command, is_on: F)
    where
        F: Fn(&CommandState) -> bool + 'static,
    {
        let props: Weak<RefCell<ButtonProps>> = Rc::downgrade(&self.props);
        command.subscribe(Box::new(move |state| {
            let Some(props) = props.upgrade() else {
                return false;
            };
            let mut props = props.borrow_mut();
            props.is_enabled = state.is_enabled;
            props.is_on = is_on(state);
            true
        }));
    }

    /// Sets the command run when the button is pressed.
    pub fn on_execute(&mut self, invocation: CommandInvocation) {
        self.action = Some(invocation);
    }

    pub fn action(&self) -> Option<&CommandInvocation> {
        self.action.as_ref()
    }

    /// Returns a snapshot of the current properties.
    pub fn props(&self) -> ButtonProps {
        self.props.borrow().clone()
    }

    pub fn label(&self) -> Option<String> {
        self.props.borrow().label.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.props.borrow().is_enabled
    }

    pub fn is_on(&self) -> bool {
        self.props.borrow().is_on
    }
}

/// Everything a component builder can reach.
pub struct ComponentContext<'a> {
    pub locale: &'a Locale,
    pub commands: &'a mut CommandCollection,
}

/// Builds a component on demand.
pub type ComponentBuilder = Box<dyn Fn(&mut ComponentContext<'_>) -> Result<ButtonView, EditorError>>;

/// Registry of lazily built, named UI components.
#[derive(Default)]
pub struct ComponentFactory {
    builders: BTreeMap<String, ComponentBuilder>,
}

impl ComponentFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a builder under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::DuplicateComponent`] if the name is taken.
    pub fn add<F>(&mut self, name: &str, builder: F) -> Result<(), EditorError>
    where
        F: Fn(&mut ComponentContext<'_>) -> Result<ButtonView, EditorError> + 'static,
    {
        if self.builders.contains_key(name) {
            return Err(EditorError::DuplicateComponent {
                name: name.to_string(),
            });
        }
        self.builders.insert(name.to_string(), Box::new(builder));
        Ok(())
    }

    pub fn has(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.builders.keys().map(String::as_str)
    }

    /// Builds a fresh instance of the named component.
    pub fn create(
        &self,
        name: &str,
        context: &mut ComponentContext<'_>,
    ) -> Result<ButtonView, EditorError> {
        let builder = self
            .builders
            .get(name)
            .ok_or_else(|| EditorError::UnknownComponent {
                name: name.to_string(),
            })?;
        builder(context)
    }
}

impl fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.builders.keys()).finish()
    }
}

/// A contextual toolbar shown when an element of a given kind is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetToolbar {
    pub aria_label: String,
    /// Component names; `"|"` separates groups.
    pub items: Vec<String>,
    /// Name of the model element the toolbar belongs to.
    pub element: String,
}

/// Registered widget toolbars, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ToolbarRepository {
    toolbars: BTreeMap<String, WidgetToolbar>,
}

impl ToolbarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`EditorError::DuplicateToolbar`] if `id` is taken.
    pub fn register(&mut self, id: &str, toolbar: WidgetToolbar) -> Result<(), EditorError> {
        if self.toolbars.contains_key(id) {
            return Err(EditorError::DuplicateToolbar { id: id.to_string() });
        }
        self.toolbars.insert(id.to_string(), toolbar);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&WidgetToolbar> {
        self.toolbars.get(id)
    }

    /// Finds the toolbar for elements named `element`.
    pub fn for_element(&self, element: &str) -> Option<(&str, &WidgetToolbar)> {
        self.toolbars
            .iter()
            .find(|(_, toolbar)| toolbar.element == element)
            .map(|(id, toolbar)| (id.as_str(), toolbar))
    }
}
