//! Executable, observable commands.

use std::collections::BTreeMap;
use std::fmt;

use super::error::EditorError;
use super::model::Model;

/// The observable state of a command.
///
/// `value` is command specific; `None` stands for "no value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandState {
    pub is_enabled: bool,
    pub value: Option<String>,
}

impl CommandState {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn enabled(value: Option<String>) -> Self {
        Self {
            is_enabled: true,
            value,
        }
    }
}

/// Callback notified with the new state whenever it changes.
///
/// Returns `false` once it no longer needs updates, after which it is dropped.
pub type StateListener = Box<dyn Fn(&CommandState) -> bool>;

/// A [`CommandState`] with change listeners.
#[derive(Default)]
pub struct ObservableState {
    state: CommandState,
    listeners: Vec<StateListener>,
}

impl ObservableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> &CommandState {
        &self.state
    }

    /// Replaces the state, notifying listeners when it differs.
    pub fn set(&mut self, next: CommandState) {
        if next == self.state {
            return;
        }
        self.state = next;
        let state = &self.state;
        self.listeners.retain(|listener| listener(state));
    }

    /// Adds a listener and immediately calls it with the current state.
    pub fn subscribe(&mut self, listener: StateListener) {
        if listener(&self.state) {
            self.listeners.push(listener);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for ObservableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableState")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Options passed to [`Command::execute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub value: Option<String>,
}

impl ExecuteOptions {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

/// A named action the editor can execute.
pub trait Command {
    /// Recomputes the state from the model (selection and attributes).
    fn refresh(&mut self, model: &Model);

    /// Performs the action inside one model change block.
    fn execute(&mut self, model: &mut Model, options: &ExecuteOptions) -> Result<(), EditorError>;

    fn state(&self) -> &CommandState;

    fn subscribe(&mut self, listener: StateListener);
}

/// Commands registered on an editor, keyed by name.
#[derive(Default)]
pub struct CommandCollection {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl CommandCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::DuplicateCommand`] if the name is taken.
    pub fn add(&mut self, name: &str, command: Box<dyn Command>) -> Result<(), EditorError> {
        if self.commands.contains_key(name) {
            return Err(EditorError::DuplicateCommand {
                name: name.to_string(),
            });
        }
        self.commands.insert(name.to_string(), command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|command| command.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn Command + 'static)> {
        self.commands.get_mut(name).map(|command| command.as_mut())
    }

    pub fn refresh_all(&mut self, model: &Model) {
        for command in self.commands.values_mut() {
            command.refresh(model);
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}

impl fmt::Debug for CommandCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.commands.keys()).finish()
    }
}
