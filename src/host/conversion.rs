//! Ordered conversion pipelines between the model and the rendered trees.
//!
//! Converters are registered as named stages on an event name. Downcast
//! events are named `attribute:<key>:<element>` and fire when a model
//! attribute changes; upcast events are named `element:<view element>` and
//! fire while persisted content is parsed into the model.
//!
//! # Ordering
//!
//! Stages run by [`Priority`], and in registration order within one priority.
//! Every stage runs; there is no early stop.
//!
//! # Consumption
//!
//! Competing stages coordinate through [`Consumables`], an explicit set of
//! pending [`ConsumeKey`]s. The dispatcher seeds the set before firing and a
//! stage calls [`Consumables::consume`] to claim an item. Only the first claim
//! succeeds, so a change is never processed twice.
//!
//! # Outcomes
//!
//! Each stage reports an [`Outcome`] and [`ConversionReport`] collects them in
//! run order.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::model::{AttributeChange, ModelReader, ModelWriter, NodeId, SchemaCheck};
use super::view::{Mapper, ViewId, ViewReader, ViewWriter};

/// Stage priority. Stages with a higher priority run first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
    Highest,
    High,
    #[default]
    Normal,
    Low,
    Lowest,
}

/// What a stage did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The stage applied its effect.
    Handled,
    /// The stage applied, but a guard declined (already consumed, excluded context).
    Skipped,
    /// The event lacks what the stage needs (no model range, attribute not allowed).
    NotApplicable,
}

/// An item that can be claimed by one converter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConsumeKey {
    /// A changed model attribute.
    Attribute { node: NodeId, key: String },
    /// A class on a parsed view element.
    Class { element: ViewId, class: String },
}

impl ConsumeKey {
    pub fn attribute(node: NodeId, key: &str) -> Self {
        ConsumeKey::Attribute {
            node,
            key: key.to_string(),
        }
    }

    pub fn class(element: ViewId, class: &str) -> Self {
        ConsumeKey::Class {
            element,
            class: class.to_string(),
        }
    }
}

/// The consumption gate shared by the stages of one conversion.
#[derive(Debug, Clone, Default)]
pub struct Consumables {
    pending: HashSet<ConsumeKey>,
}

impl Consumables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `key` available for consumption.
    pub fn add(&mut self, key: ConsumeKey) {
        self.pending.insert(key);
    }

    /// Claims `key`. Returns `true` only for the first claim of an available key.
    pub fn consume(&mut self, key: &ConsumeKey) -> bool {
        self.pending.remove(key)
    }

    /// Returns `true` if `key` is available and not yet claimed.
    pub fn test(&self, key: &ConsumeKey) -> bool {
        self.pending.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Outcomes of one fired event, in run order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    entries: Vec<(String, Outcome)>,
}

impl ConversionReport {
    fn push(&mut self, stage: &str, outcome: Outcome) {
        self.entries.push((stage.to_string(), outcome));
    }

    /// Returns the outcome of the named stage, if it ran.
    pub fn outcome_of(&self, stage: &str) -> Option<Outcome> {
        self.entries
            .iter()
            .find(|(name, _)| name == stage)
            .map(|(_, outcome)| *outcome)
    }

    /// Returns `true` if at least one stage handled the event.
    pub fn handled(&self) -> bool {
        self.entries
            .iter()
            .any(|(_, outcome)| *outcome == Outcome::Handled)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Outcome)> {
        self.entries
            .iter()
            .map(|(name, outcome)| (name.as_str(), *outcome))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct Stage<H> {
    name: String,
    priority: Priority,
    handler: H,
}

struct Pipeline<H> {
    stages: HashMap<String, Vec<Stage<H>>>,
}

impl<H> Pipeline<H> {
    fn new() -> Self {
        Self {
            stages: HashMap::new(),
        }
    }

    fn on(&mut self, event: &str, name: &str, priority: Priority, handler: H) {
        let stages = self.stages.entry(event.to_string()).or_default();
        stages.push(Stage {
            name: name.to_string(),
            priority,
            handler,
        });
        // Stable: registration order is kept within a priority.
        stages.sort_by_key(|stage| stage.priority);
    }

    fn stages(&self, event: &str) -> &[Stage<H>] {
        self.stages.get(event).map(Vec::as_slice).unwrap_or(&[])
    }

    fn stage_names(&self, event: &str) -> Vec<&str> {
        self.stages(event)
            .iter()
            .map(|stage| stage.name.as_str())
            .collect()
    }

    fn describe(&self) -> Vec<(String, Vec<String>)> {
        let mut events: Vec<(String, Vec<String>)> = self
            .stages
            .iter()
            .map(|(event, stages)| {
                (
                    event.clone(),
                    stages.iter().map(|stage| stage.name.clone()).collect(),
                )
            })
            .collect();
        events.sort();
        events
    }
}

/// What a downcast stage may touch.
pub struct DowncastApi<'a> {
    pub consumables: &'a mut Consumables,
    pub model: &'a dyn ModelReader,
    pub mapper: &'a Mapper,
    pub writer: &'a mut dyn ViewWriter,
}

/// A model-to-view stage.
pub type DowncastHandler = Box<dyn Fn(&AttributeChange, &mut DowncastApi<'_>) -> Outcome>;

/// Dispatches attribute changes to model-to-view stages.
pub struct DowncastDispatcher {
    pipeline: Pipeline<DowncastHandler>,
}

impl DowncastDispatcher {
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::new(),
        }
    }

    /// Registers a stage for `event`.
    pub fn on<F>(&mut self, event: &str, stage: &str, priority: Priority, handler: F)
    where
        F: Fn(&AttributeChange, &mut DowncastApi<'_>) -> Outcome + 'static,
    {
        self.pipeline.on(event, stage, priority, Box::new(handler));
    }

    /// Names of the stages registered for `event`, in run order.
    pub fn stage_names(&self, event: &str) -> Vec<&str> {
        self.pipeline.stage_names(event)
    }

    /// Seeds the change as consumable and fires `attribute:<key>:<element>`.
    pub fn convert_attribute(
        &self,
        element_name: &str,
        change: &AttributeChange,
        api: &mut DowncastApi<'_>,
    ) -> ConversionReport {
        api.consumables
            .add(ConsumeKey::attribute(change.item, &change.key));
        let event = format!("attribute:{}:{}", change.key, element_name);
        self.fire(&event, change, api)
    }

    /// Runs every stage registered for `event`.
    pub fn fire(
        &self,
        event: &str,
        change: &AttributeChange,
        api: &mut DowncastApi<'_>,
    ) -> ConversionReport {
        let mut report = ConversionReport::default();
        for stage in self.pipeline.stages(event) {
            report.push(&stage.name, (stage.handler)(change, api));
        }
        report
    }
}

impl Default for DowncastDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DowncastDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DowncastDispatcher")
            .field("stages", &self.pipeline.describe())
            .finish()
    }
}

/// A view element being parsed into the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementParse {
    /// The parsed view element.
    pub view_item: ViewId,
    /// Model element new content is inserted into.
    pub model_cursor: NodeId,
    /// Model elements produced for `view_item`, set by the stage converting it.
    pub model_range: Option<Vec<NodeId>>,
    /// Model element the view children are converted into, if not `model_cursor`.
    pub children_cursor: Option<NodeId>,
}

impl ElementParse {
    pub fn new(view_item: ViewId, model_cursor: NodeId) -> Self {
        Self {
            view_item,
            model_cursor,
            model_range: None,
            children_cursor: None,
        }
    }
}

/// What an upcast stage may touch.
pub struct UpcastApi<'a> {
    pub consumables: &'a mut Consumables,
    pub schema: &'a dyn SchemaCheck,
    pub view: &'a dyn ViewReader,
    pub writer: &'a mut dyn ModelWriter,
}

/// A view-to-model stage.
pub type UpcastHandler = Box<dyn Fn(&mut ElementParse, &mut UpcastApi<'_>) -> Outcome>;

/// Dispatches parsed view elements to view-to-model stages.
pub struct UpcastDispatcher {
    pipeline: Pipeline<UpcastHandler>,
}

impl UpcastDispatcher {
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::new(),
        }
    }

    /// Registers a stage for `event`.
    pub fn on<F>(&mut self, event: &str, stage: &str, priority: Priority, handler: F)
    where
        F: Fn(&mut ElementParse, &mut UpcastApi<'_>) -> Outcome + 'static,
    {
        self.pipeline.on(event, stage, priority, Box::new(handler));
    }

    /// Names of the stages registered for `event`, in run order.
    pub fn stage_names(&self, event: &str) -> Vec<&str> {
        self.pipeline.stage_names(event)
    }

    /// Seeds the element's classes as consumable and fires `element:<name>`.
    pub fn convert_element(
        &self,
        data: &mut ElementParse,
        api: &mut UpcastApi<'_>,
    ) -> ConversionReport {
        let Some(name) = api.view.name(data.view_item) else {
            return ConversionReport::default();
        };
        let event = format!("element:{name}");
        for class in api.view.classes(data.view_item) {
            api.consumables.add(ConsumeKey::class(data.view_item, class));
        }
        self.fire(&event, data, api)
    }

    /// Runs every stage registered for `event`.
    pub fn fire(
        &self,
        event: &str,
        data: &mut ElementParse,
        api: &mut UpcastApi<'_>,
    ) -> ConversionReport {
        let mut report = ConversionReport::default();
        for stage in self.pipeline.stages(event) {
            report.push(&stage.name, (stage.handler)(data, api));
        }
        report
    }
}

impl Default for UpcastDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UpcastDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpcastDispatcher")
            .field("stages", &self.pipeline.describe())
            .finish()
    }
}
