//! Conversion between the `mediaStyle` model attribute and view classes.
//!
//! Both converters are closed over a resolved [`MediaStyles`] catalog and are
//! registered as stages on the host's conversion pipelines:
//!
//! - [`downcast_style_attribute`] handles `attribute:mediaStyle:media` on the
//!   editing and data pipelines. It swaps the class of the old style for the
//!   class of the new one on the rendered `figure`.
//! - [`upcast_style_attribute`] runs on `element:div` at low priority, after
//!   the host created the model `media` element, and turns a style class found
//!   on the wrapping `figure` back into the attribute.
//!
//! Media inside a spoiler container never carries a style in either
//! direction. Default styles never map to a class.

use std::rc::Rc;

use log::trace;

use crate::host::{
    AttributeChange, ConsumeKey, DowncastApi, ElementParse, ModelReader, Outcome, UpcastApi,
    ViewReader,
};
use crate::style::{MediaStyles, StyleDescriptor};
use crate::{MEDIA_STYLE_ATTRIBUTE, SPOILER_CONTENT};

/// Builds the model-to-view stage for the style attribute.
///
/// Old and new values are looked up by name; a value that names no style (or
/// a default style) leaves that half of the swap out.
pub fn downcast_style_attribute(
    styles: MediaStyles,
) -> impl Fn(&AttributeChange, &mut DowncastApi<'_>) -> Outcome + Clone + 'static {
    move |change, api| {
        if !api
            .consumables
            .consume(&ConsumeKey::attribute(change.item, &change.key))
        {
            return Outcome::Skipped;
        }
        if api.model.parent_name(change.item) == Some(SPOILER_CONTENT) {
            trace!(target: "mediastyle", "media {:?} is inside a spoiler, not styling", change.item);
            return Outcome::Skipped;
        }
        let Some(figure) = api.mapper.to_view_element(change.item) else {
            return Outcome::NotApplicable;
        };

        if let Some(class) = style_class(&styles, change.old_value.as_deref()) {
            api.writer.remove_class(class, figure);
        }
        if let Some(class) = style_class(&styles, change.new_value.as_deref()) {
            api.writer.add_class(class, figure);
        }
        Outcome::Handled
    }
}

fn style_class<'a>(styles: &'a MediaStyles, name: Option<&str>) -> Option<&'a str> {
    styles
        .find(name?)
        .and_then(StyleDescriptor::view_class)
}

/// Builds the view-to-model stage for the style attribute.
///
/// Every non-default style whose class is present on the parent of the
/// parsed element sets the attribute, so with conflicting classes the last
/// style in catalog order wins.
pub fn upcast_style_attribute(
    styles: &MediaStyles,
) -> impl Fn(&mut ElementParse, &mut UpcastApi<'_>) -> Outcome + Clone + 'static {
    let candidates: Rc<[StyleDescriptor]> = styles.non_default().cloned().collect();

    move |data, api| {
        let Some(&item) = data.model_range.as_ref().and_then(|range| range.first()) else {
            return Outcome::NotApplicable;
        };
        let allowed = api
            .writer
            .name(item)
            .is_some_and(|name| api.schema.check_attribute(name, MEDIA_STYLE_ATTRIBUTE));
        if !allowed {
            return Outcome::NotApplicable;
        }
        let Some(figure) = api.view.parent(data.view_item) else {
            return Outcome::Skipped;
        };

        let in_spoiler = api.writer.parent_name(item) == Some(SPOILER_CONTENT);
        let mut outcome = Outcome::Skipped;
        for style in candidates.iter() {
            let Some(class) = style.class_name.as_deref() else {
                continue;
            };
            if !api.consumables.consume(&ConsumeKey::class(figure, class)) || in_spoiler {
                continue;
            }
            api.writer
                .set_attribute(MEDIA_STYLE_ATTRIBUTE, &style.name, item);
            outcome = Outcome::Handled;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{
        parse_markup, register_host_upcasts, serialize, upcast_tree, Consumables, Document,
        Mapper, ModelWriter, NodeId, Priority, Schema, UpcastDispatcher, ViewId, ViewTree,
        ViewWriter,
    };
    use crate::style::{BuiltinStyles, PartialStyle};
    use crate::MEDIA_ELEMENT;

    pub(super) fn catalog() -> MediaStyles {
        MediaStyles::from_config(
            &[
                "full".into(),
                "side".into(),
                "alignLeft".into(),
                "alignCenter".into(),
                "alignRight".into(),
            ],
            BuiltinStyles::global(),
        )
    }

    /// A media element rendered as `figure.media > div`.
    pub(super) struct Fixture {
        document: Document,
        view: ViewTree,
        mapper: Mapper,
        media: NodeId,
        figure: ViewId,
    }

    impl Fixture {
        pub(super) fn new(in_spoiler: bool) -> Self {
            let mut document = Document::new();
            let root = document.root();
            let media = document.change(|writer| {
                let parent = if in_spoiler {
                    writer.insert_element(SPOILER_CONTENT, root)
                } else {
                    root
                };
                writer.insert_element(MEDIA_ELEMENT, parent)
            });
            document.take_changes();

            let mut view = ViewTree::new();
            let figure = view.create_element("figure", view.root());
            view.add_class("media", figure);
            let embed = view.create_element("div", figure);
            view.set_attribute(embed, "data-oembed-url", "https://example.com/v");
            let mut mapper = Mapper::new();
            mapper.bind(media, figure);

            Self {
                document,
                view,
                mapper,
                media,
                figure,
            }
        }

        pub(super) fn downcast<F>(&mut self, converter: &F, old: Option<&str>, new: Option<&str>) -> Outcome
        where
            F: Fn(&AttributeChange, &mut DowncastApi<'_>) -> Outcome,
        {
            let change = AttributeChange {
                item: self.media,
                key: MEDIA_STYLE_ATTRIBUTE.to_string(),
                old_value: old.map(str::to_string),
                new_value: new.map(str::to_string),
            };
            let mut consumables = Consumables::new();
            consumables.add(ConsumeKey::attribute(self.media, MEDIA_STYLE_ATTRIBUTE));
            let mut api = DowncastApi {
                consumables: &mut consumables,
                model: &self.document,
                mapper: &self.mapper,
                writer: &mut self.view,
            };
            converter(&change, &mut api)
        }

        pub(super) fn classes(&self) -> &[String] {
            self.view.classes(self.figure)
        }

        pub(super) fn markup(&self) -> String {
            serialize(&self.view).unwrap()
        }
    }

    /// Parses `markup` with the host stages plus the style upcast and
    /// returns the document.
    pub(super) fn upcast(styles: &MediaStyles, markup: &str) -> Document {
        let view = parse_markup(markup).unwrap();
        let mut dispatcher = UpcastDispatcher::new();
        register_host_upcasts(&mut dispatcher);
        dispatcher.on(
            "element:div",
            "mediaStyle",
            Priority::Low,
            upcast_style_attribute(styles),
        );
        let mut schema = Schema::new();
        schema.extend(MEDIA_ELEMENT, MEDIA_STYLE_ATTRIBUTE);

        let mut document = Document::new();
        let root = document.root();
        document.change(|writer| upcast_tree(&view, &dispatcher, &schema, writer, root));
        document
    }

    fn first_style(document: &Document) -> Option<&str> {
        let media = document.elements_named(MEDIA_ELEMENT);
        document.attribute(media[0], MEDIA_STYLE_ATTRIBUTE)
    }

    #[test]
    fn test_downcast_adds_class_for_new_style() {
        let converter = downcast_style_attribute(catalog());
        let mut fixture = Fixture::new(false);

        let outcome = fixture.downcast(&converter, None, Some("side"));

        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(fixture.classes(), &["media", "media-style-side"]);
    }

    #[test]
    fn test_downcast_swaps_classes() {
        let converter = downcast_style_attribute(catalog());
        let mut fixture = Fixture::new(false);
        fixture.downcast(&converter, None, Some("side"));

        fixture.downcast(&converter, Some("side"), Some("alignLeft"));

        assert_eq!(fixture.classes(), &["media", "media-style-align-left"]);
    }

    #[test]
    fn test_downcast_to_default_removes_class_only() {
        let converter = downcast_style_attribute(catalog());
        let mut fixture = Fixture::new(false);
        fixture.downcast(&converter, None, Some("alignRight"));

        fixture.downcast(&converter, Some("alignRight"), None);
        assert_eq!(fixture.classes(), &["media"]);

        fixture.downcast(&converter, None, Some("full"));
        assert_eq!(fixture.classes(), &["media"]);
    }

    #[test]
    fn test_downcast_tolerates_unknown_values() {
        let converter = downcast_style_attribute(catalog());
        let mut fixture = Fixture::new(false);
        fixture.downcast(&converter, None, Some("side"));

        let outcome = fixture.downcast(&converter, Some("sideways"), Some("bogus"));

        assert_eq!(outcome, Outcome::Handled);
        assert_eq!(fixture.classes(), &["media", "media-style-side"]);
    }

    #[test]
    fn test_downcast_skips_media_in_spoiler() {
        let converter = downcast_style_attribute(catalog());
        let mut fixture = Fixture::new(true);

        let outcome = fixture.downcast(&converter, None, Some("side"));

        assert_eq!(outcome, Outcome::Skipped);
        assert_eq!(fixture.classes(), &["media"]);
    }

    #[test]
    fn test_downcast_skips_consumed_change() {
        let converter = downcast_style_attribute(catalog());
        let mut fixture = Fixture::new(false);
        let change = AttributeChange {
            item: fixture.media,
            key: MEDIA_STYLE_ATTRIBUTE.to_string(),
            old_value: None,
            new_value: Some("side".to_string()),
        };
        let mut consumables = Consumables::new();
        let mut api = DowncastApi {
            consumables: &mut consumables,
            model: &fixture.document,
            mapper: &fixture.mapper,
            writer: &mut fixture.view,
        };

        assert_eq!(converter(&change, &mut api), Outcome::Skipped);
        assert_eq!(fixture.classes(), &["media"]);
    }

    #[test]
    fn test_downcast_default_with_class_adds_nothing() {
        let styles = MediaStyles::new(vec![
            PartialStyle::new("plain")
                .class_name("media-style-plain")
                .default_style(true)
                .into_descriptor(),
        ]);
        let converter = downcast_style_attribute(styles);
        let mut fixture = Fixture::new(false);

        fixture.downcast(&converter, None, Some("plain"));

        assert_eq!(fixture.classes(), &["media"]);
    }

    #[test]
    fn test_upcast_reads_class_from_figure() {
        let document = upcast(
            &catalog(),
            r#"<figure class="media media-style-align-center"><div data-oembed-url="u"></div></figure>"#,
        );
        assert_eq!(first_style(&document), Some("alignCenter"));
    }

    #[test]
    fn test_upcast_without_style_class_leaves_attribute_absent() {
        let document = upcast(
            &catalog(),
            r#"<figure class="media"><div data-oembed-url="u"></div></figure>"#,
        );
        assert_eq!(first_style(&document), None);
    }

    #[test]
    fn test_upcast_last_match_wins() {
        let document = upcast(
            &catalog(),
            r#"<figure class="media media-style-align-right media-style-side"><div data-oembed-url="u"></div></figure>"#,
        );
        // Catalog order is side, alignLeft, alignCenter, alignRight.
        assert_eq!(first_style(&document), Some("alignRight"));
    }

    #[test]
    fn test_upcast_ignores_media_in_spoiler() {
        let document = upcast(
            &catalog(),
            r#"<div class="spoiler-content"><figure class="media media-style-side"><div data-oembed-url="u"></div></figure></div>"#,
        );
        let media = document.elements_named(MEDIA_ELEMENT);
        assert_eq!(document.parent_name(media[0]), Some(SPOILER_CONTENT));
        assert_eq!(first_style(&document), None);
    }

    #[test]
    fn test_upcast_requires_schema_permission() {
        let view = parse_markup(
            r#"<figure class="media media-style-side"><div data-oembed-url="u"></div></figure>"#,
        )
        .unwrap();
        let mut dispatcher = UpcastDispatcher::new();
        register_host_upcasts(&mut dispatcher);
        dispatcher.on(
            "element:div",
            "mediaStyle",
            Priority::Low,
            upcast_style_attribute(&catalog()),
        );
        let schema = Schema::new();
        let mut document = Document::new();
        let root = document.root();

        document.change(|writer| upcast_tree(&view, &dispatcher, &schema, writer, root));

        assert_eq!(first_style(&document), None);
    }

    #[test]
    fn test_upcast_without_model_range_is_not_applicable() {
        let converter = upcast_style_attribute(&catalog());
        let view = parse_markup(r#"<figure class="media-style-side"><div></div></figure>"#).unwrap();
        let figure = view.children(view.root())[0];
        let div = view.children(figure)[0];
        let schema = Schema::new();
        let mut document = Document::new();
        let root = document.root();

        let outcome = document.change(|writer| {
            let mut consumables = Consumables::new();
            let mut api = UpcastApi {
                consumables: &mut consumables,
                schema: &schema,
                view: &view,
                writer,
            };
            converter(&mut ElementParse::new(div, root), &mut api)
        });

        assert_eq!(outcome, Outcome::NotApplicable);
    }

    #[test]
    fn test_upcast_never_matches_default_style() {
        let styles = MediaStyles::new(vec![
            PartialStyle::new("plain")
                .class_name("media-style-plain")
                .default_style(true)
                .into_descriptor(),
            BuiltinStyles::global().style("side").cloned().unwrap(),
        ]);
        let document = upcast(
            &styles,
            r#"<figure class="media media-style-plain"><div data-oembed-url="u"></div></figure>"#,
        );
        assert_eq!(first_style(&document), None);
    }
}
