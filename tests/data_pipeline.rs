use mediastyle::host::{EditorBuilder, ExecuteOptions, ModelReader};
use mediastyle::{MediaStyle, COMMAND_NAME, MEDIA_ELEMENT, MEDIA_STYLE_ATTRIBUTE};
use serde_json::json;

const PLAIN: &str =
    r#"<figure class="media"><div data-oembed-url="https://example.com/video"></div></figure>"#;
const SIDE: &str = r#"<figure class="media media-style-side"><div data-oembed-url="https://example.com/video"></div></figure>"#;

fn editor() -> mediastyle::host::Editor {
    EditorBuilder::new()
        .config(json!({
            "mediaEmbed": { "styles": ["full", "side", "alignLeft", "alignCenter", "alignRight"] }
        }))
        .plugin(MediaStyle)
        .build()
        .unwrap()
}

#[test]
fn test_loading_styled_media_sets_attribute() {
    let mut editor = editor();

    editor.set_data(SIDE).unwrap();

    let media = editor.model().document.elements_named(MEDIA_ELEMENT)[0];
    assert_eq!(
        editor.model().document.attribute(media, MEDIA_STYLE_ATTRIBUTE),
        Some("side")
    );
    assert_eq!(
        editor.editing().classes_of(media),
        &["media", "media-style-side"]
    );
    assert_eq!(editor.get_data().unwrap(), SIDE);
}

#[test]
fn test_loading_unstyled_media_keeps_default() {
    let mut editor = editor();

    editor.set_data(PLAIN).unwrap();

    let media = editor.model().document.elements_named(MEDIA_ELEMENT)[0];
    assert!(!editor
        .model()
        .document
        .has_attribute(media, MEDIA_STYLE_ATTRIBUTE));
    assert_eq!(editor.get_data().unwrap(), PLAIN);
}

#[test]
fn test_restyling_updates_data_and_editing_views() {
    let mut editor = editor();
    editor.set_data(SIDE).unwrap();
    let media = editor.model().document.elements_named(MEDIA_ELEMENT)[0];
    editor.select(Some(media));

    editor
        .execute(COMMAND_NAME, &ExecuteOptions::value("alignCenter"))
        .unwrap();

    assert_eq!(
        editor.get_data().unwrap(),
        r#"<figure class="media media-style-align-center"><div data-oembed-url="https://example.com/video"></div></figure>"#
    );
    assert_eq!(
        editor.editing().classes_of(media),
        &["media", "media-style-align-center"]
    );

    editor
        .execute(COMMAND_NAME, &ExecuteOptions::value("full"))
        .unwrap();
    assert_eq!(editor.get_data().unwrap(), PLAIN);
}

#[test]
fn test_every_style_survives_save_and_load() {
    for style in ["side", "alignLeft", "alignCenter", "alignRight"] {
        let mut editor = editor();
        editor.set_data(PLAIN).unwrap();
        let media = editor.model().document.elements_named(MEDIA_ELEMENT)[0];
        editor.select(Some(media));
        editor
            .execute(COMMAND_NAME, &ExecuteOptions::value(style))
            .unwrap();
        let saved = editor.get_data().unwrap();

        let mut reloaded = self::editor();
        reloaded.set_data(&saved).unwrap();

        let media = reloaded.model().document.elements_named(MEDIA_ELEMENT)[0];
        assert_eq!(
            reloaded.model().document.attribute(media, MEDIA_STYLE_ATTRIBUTE),
            Some(style)
        );
        assert_eq!(reloaded.get_data().unwrap(), saved);
    }
}

#[test]
fn test_conflicting_classes_resolve_to_last_catalog_style() {
    let mut editor = editor();

    editor
        .set_data(r#"<figure class="media media-style-align-left media-style-side"><div data-oembed-url="u"></div></figure>"#)
        .unwrap();

    let media = editor.model().document.elements_named(MEDIA_ELEMENT)[0];
    assert_eq!(
        editor.model().document.attribute(media, MEDIA_STYLE_ATTRIBUTE),
        Some("alignLeft")
    );
}

#[test]
fn test_media_in_spoiler_is_never_styled() {
    let mut editor = editor();
    let markup = r#"<div class="spoiler-content"><figure class="media media-style-side"><div data-oembed-url="u"></div></figure></div>"#;

    editor.set_data(markup).unwrap();

    let media = editor.model().document.elements_named(MEDIA_ELEMENT)[0];
    assert!(!editor
        .model()
        .document
        .has_attribute(media, MEDIA_STYLE_ATTRIBUTE));

    editor.select(Some(media));
    editor
        .execute(COMMAND_NAME, &ExecuteOptions::value("alignRight"))
        .unwrap();

    assert_eq!(
        editor.model().document.attribute(media, MEDIA_STYLE_ATTRIBUTE),
        Some("alignRight")
    );
    assert_eq!(
        editor.get_data().unwrap(),
        r#"<div class="spoiler-content"><figure class="media"><div data-oembed-url="u"></div></figure></div>"#
    );
}

#[test]
fn test_unknown_classes_are_ignored() {
    let mut editor = editor();

    editor
        .set_data(r#"<figure class="media media-style-sideways"><div data-oembed-url="u"></div></figure>"#)
        .unwrap();

    let media = editor.model().document.elements_named(MEDIA_ELEMENT)[0];
    assert!(!editor
        .model()
        .document
        .has_attribute(media, MEDIA_STYLE_ATTRIBUTE));
    assert_eq!(
        editor.get_data().unwrap(),
        r#"<figure class="media"><div data-oembed-url="u"></div></figure>"#
    );
}

#[test]
fn test_embed_outside_media_figure_is_not_media() {
    let mut editor = editor();

    editor
        .set_data(r#"<section class="media-style-side"><div data-oembed-url="u"></div></section>"#)
        .unwrap();

    assert!(editor.model().document.elements_named(MEDIA_ELEMENT).is_empty());
}
