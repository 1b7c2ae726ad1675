//! The editor host the media style feature plugs into.
//!
//! The feature modules only talk to the host through the traits and types
//! re-exported here: the model contract ([`ModelReader`], [`ModelWriter`],
//! [`SchemaCheck`]), the view contract ([`ViewReader`], [`ViewWriter`],
//! [`Mapper`]), ordered conversion pipelines ([`DowncastDispatcher`],
//! [`UpcastDispatcher`]), [`Command`]s, [`Localizer`], the component
//! factory and the editor configuration.
//!
//! [`Editor`] is an in-memory implementation of all of it, with a data
//! pipeline that loads and saves XML-compatible markup.

mod command;
mod config;
mod conversion;
mod data;
mod editor;
mod error;
mod locale;
mod model;
mod ui;
mod view;

pub use command::{
    Command, CommandCollection, CommandState, ExecuteOptions, ObservableState, StateListener,
};
pub use config::EditorConfig;
pub use conversion::{
    ConsumeKey, Consumables, ConversionReport, DowncastApi, DowncastDispatcher, DowncastHandler,
    ElementParse, Outcome, Priority, UpcastApi, UpcastDispatcher, UpcastHandler,
};
pub use data::{
    parse_markup, register_host_upcasts, serialize, upcast_tree, MEDIA_CLASS,
    MEDIA_URL_ATTRIBUTE, SPOILER_CLASS,
};
pub use editor::{Editor, EditorBuilder, Plugin, ViewController};
pub use error::{ConfigError, DataError, EditorError};
pub use locale::{Locale, Localizer};
pub use model::{
    AttributeChange, Document, Model, ModelChange, ModelReader, ModelWriter, NodeId, Schema,
    SchemaCheck, Writer,
};
pub use ui::{
    ButtonProps, ButtonView, CommandInvocation, ComponentBuilder, ComponentContext,
    ComponentFactory, ToolbarRepository, WidgetToolbar,
};
pub use view::{Mapper, ViewId, ViewReader, ViewTree, ViewWriter};
