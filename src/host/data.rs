//! Persisted markup: parsing into a view tree, upcasting, and serialization.
//!
//! Markup is handled as XML-compatible HTML: every element is explicitly
//! closed or self-closing, text content is ignored, and the `class`
//! attribute is split into the element's class list.

use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use super::conversion::{
    ConsumeKey, Consumables, ElementParse, Outcome, Priority, UpcastApi, UpcastDispatcher,
};
use super::error::DataError;
use super::model::{NodeId, SchemaCheck, Writer as ModelWriterHandle};
use super::view::{ViewId, ViewReader, ViewTree, ViewWriter};

/// Class marking a media wrapper in persisted content.
pub const MEDIA_CLASS: &str = "media";
/// Class marking a spoiler container in persisted content.
pub const SPOILER_CLASS: &str = "spoiler-content";
/// Attribute carrying the embedded media URL.
pub const MEDIA_URL_ATTRIBUTE: &str = "data-oembed-url";

/// Parses markup into a fresh view tree.
pub fn parse_markup(markup: &str) -> Result<ViewTree, DataError> {
    let mut view = ViewTree::new();
    let mut open = vec![view.root()];
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(true);

    loop {
        let event = reader.read_event().map_err(|e| DataError::Malformed {
            message: e.to_string(),
        })?;
        match event {
            Event::Start(start) => {
                let parent = current(&open, &view);
                let element = open_element(&mut view, &start, parent)?;
                open.push(element);
            }
            Event::Empty(start) => {
                let parent = current(&open, &view);
                open_element(&mut view, &start, parent)?;
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                if open.len() < 2 || view.name(current(&open, &view)) != Some(name.as_str()) {
                    return Err(DataError::UnexpectedClose { name });
                }
                open.pop();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if open.len() > 1 {
        let name = view
            .name(current(&open, &view))
            .unwrap_or_default()
            .to_string();
        return Err(DataError::Unclosed { name });
    }
    Ok(view)
}

fn current(open: &[ViewId], view: &ViewTree) -> ViewId {
    open.last().copied().unwrap_or_else(|| view.root())
}

fn open_element(
    view: &mut ViewTree,
    start: &BytesStart<'_>,
    parent: ViewId,
) -> Result<ViewId, DataError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let element = view.create_element(&name, parent);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| DataError::Malformed {
            message: e.to_string(),
        })?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|e| DataError::Malformed {
                message: e.to_string(),
            })?;

        if key == "class" {
            for class in value.split_whitespace() {
                view.add_class(class, element);
            }
        } else {
            view.set_attribute(element, &key, &value);
        }
    }
    Ok(element)
}

/// Serializes the children of the view root.
pub fn serialize(view: &ViewTree) -> Result<String, DataError> {
    let mut writer = Writer::new(Vec::new());
    for &child in view.children(view.root()) {
        write_element(&mut writer, view, child)?;
    }
    String::from_utf8(writer.into_inner()).map_err(|e| DataError::Serialize {
        message: e.to_string(),
    })
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    view: &ViewTree,
    element: ViewId,
) -> Result<(), DataError> {
    let name = view.name(element).unwrap_or_default();
    let mut start = BytesStart::new(name);

    let classes = view.classes(element).join(" ");
    if !classes.is_empty() {
        start.push_attribute(("class", classes.as_str()));
    }
    for (key, value) in view.attributes(element) {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(serialize_error)?;
    for &child in view.children(element) {
        write_element(writer, view, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(serialize_error)?;
    Ok(())
}

fn serialize_error(e: impl std::fmt::Display) -> DataError {
    DataError::Serialize {
        message: e.to_string(),
    }
}

/// Upcasts every element below the view root into the model, depth first.
pub fn upcast_tree(
    view: &ViewTree,
    dispatcher: &UpcastDispatcher,
    schema: &dyn SchemaCheck,
    writer: &mut ModelWriterHandle<'_>,
    root: NodeId,
) {
    let mut consumables = Consumables::new();
    upcast_children(view, view.root(), root, dispatcher, schema, writer, &mut consumables);
}

fn upcast_children(
    view: &ViewTree,
    element: ViewId,
    cursor: NodeId,
    dispatcher: &UpcastDispatcher,
    schema: &dyn SchemaCheck,
    writer: &mut ModelWriterHandle<'_>,
    consumables: &mut Consumables,
) {
    for &child in view.children(element) {
        let mut data = ElementParse::new(child, cursor);
        let mut api = UpcastApi {
            consumables: &mut *consumables,
            schema,
            view,
            writer: &mut *writer,
        };
        dispatcher.convert_element(&mut data, &mut api);

        let next = data.children_cursor.unwrap_or(cursor);
        upcast_children(view, child, next, dispatcher, schema, writer, consumables);
    }
}

/// Registers the host's own view-to-model stages for media and spoiler containers.
pub fn register_host_upcasts(dispatcher: &mut UpcastDispatcher) {
    dispatcher.on("element:div", "media", Priority::Normal, upcast_media);
    dispatcher.on("element:div", "spoilerContent", Priority::Normal, upcast_spoiler);
}

fn upcast_media(data: &mut ElementParse, api: &mut UpcastApi<'_>) -> Outcome {
    let in_media_figure = api.view.parent(data.view_item).is_some_and(|figure| {
        api.view.name(figure) == Some("figure") && api.view.has_class(figure, MEDIA_CLASS)
    });
    if !in_media_figure {
        return Outcome::NotApplicable;
    }

    let Some(url) = api
        .view
        .attribute(data.view_item, MEDIA_URL_ATTRIBUTE)
        .map(str::to_string)
    else {
        return Outcome::NotApplicable;
    };

    let media = api.writer.insert_element("media", data.model_cursor);
    api.writer.set_attribute("url", &url, media);
    data.model_range = Some(vec![media]);
    Outcome::Handled
}

fn upcast_spoiler(data: &mut ElementParse, api: &mut UpcastApi<'_>) -> Outcome {
    if !api
        .consumables
        .consume(&ConsumeKey::class(data.view_item, SPOILER_CLASS))
    {
        return Outcome::NotApplicable;
    }

    let spoiler = api.writer.insert_element("spoilerContent", data.model_cursor);
    data.model_range = Some(vec![spoiler]);
    data.children_cursor = Some(spoiler);
    Outcome::Handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::model::{Document, ModelReader, Schema};

    #[test]
    fn test_parse_splits_classes_and_keeps_attributes() {
        let view = parse_markup(
            r#"<figure class="media  media-style-side"><div data-oembed-url="https://a.b/c?x=1&amp;y=2"></div></figure>"#,
        )
        .unwrap();
        let figure = view.children(view.root())[0];
        let div = view.children(figure)[0];

        assert_eq!(view.classes(figure), &["media", "media-style-side"]);
        assert_eq!(
            view.attribute(div, MEDIA_URL_ATTRIBUTE),
            Some("https://a.b/c?x=1&y=2")
        );
    }

    #[test]
    fn test_parse_self_closing_element() {
        let view = parse_markup(r#"<figure class="media"><div data-oembed-url="u"/></figure>"#)
            .unwrap();
        let figure = view.children(view.root())[0];
        assert_eq!(view.children(figure).len(), 1);
    }

    #[test]
    fn test_parse_rejects_unclosed_element() {
        let err = parse_markup(r#"<figure class="media">"#).unwrap_err();
        assert_eq!(
            err,
            DataError::Unclosed {
                name: "figure".to_string()
            }
        );
    }

    #[test]
    fn test_parse_rejects_stray_closing_tag() {
        assert!(parse_markup("</figure>").is_err());
    }

    #[test]
    fn test_serialize_round_trip() {
        let markup = r#"<div class="spoiler-content"><figure class="media media-style-side"><div data-oembed-url="https://example.com/v"></div></figure></div>"#;
        let view = parse_markup(markup).unwrap();
        assert_eq!(serialize(&view).unwrap(), markup);
    }

    #[test]
    fn test_host_upcasts_build_model() {
        let view = parse_markup(
            r#"<div class="spoiler-content"><figure class="media"><div data-oembed-url="u"></div></figure></div>"#,
        )
        .unwrap();
        let mut dispatcher = UpcastDispatcher::new();
        register_host_upcasts(&mut dispatcher);
        let schema = Schema::new();
        let mut document = Document::new();
        let root = document.root();

        document.change(|writer| upcast_tree(&view, &dispatcher, &schema, writer, root));

        let media = document.elements_named("media");
        assert_eq!(media.len(), 1);
        assert_eq!(document.parent_name(media[0]), Some("spoilerContent"));
        assert_eq!(document.attribute(media[0], "url"), Some("u"));
    }

    #[test]
    fn test_embed_outside_media_figure_is_ignored() {
        let mut dispatcher = UpcastDispatcher::new();
        register_host_upcasts(&mut dispatcher);
        let schema = Schema::new();

        for markup in [
            r#"<section class="media-style-side"><div data-oembed-url="u"></div></section>"#,
            r#"<figure class="image"><div data-oembed-url="u"></div></figure>"#,
            r#"<div data-oembed-url="u"></div>"#,
        ] {
            let view = parse_markup(markup).unwrap();
            let mut document = Document::new();
            let root = document.root();
            document.change(|writer| upcast_tree(&view, &dispatcher, &schema, writer, root));

            assert!(document.elements_named("media").is_empty(), "{markup}");
        }
    }
}
