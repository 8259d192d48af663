//! Tests for the directory-backed descriptor source.

use storefront_widgets::model::WidgetKind;
use storefront_widgets::sources::{DescriptorSource, FileSource, SourceError};
use tempfile::TempDir;

mod util;

#[test]
fn loads_fixture_page_sorted_by_order() {
    let source = FileSource::new(util::fixture_pages());
    let widgets = source.fetch("home").expect("fetch");
    let ids: Vec<_> = widgets.iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["hero", "logos", "promo", "carousel", "clip", "feed"]);
    assert_eq!(widgets[3].kind, WidgetKind::Unknown("carousel".into()));
}

#[test]
fn bare_array_payload_uses_positional_order() {
    let source = FileSource::new(util::fixture_pages());
    let widgets = source.fetch("about").expect("fetch");
    assert_eq!(widgets.len(), 2);
    assert_eq!(widgets[0].order, 0);
    assert_eq!(widgets[1].kind, WidgetKind::Video);
}

#[test]
fn lists_only_json_pages_with_valid_slugs() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("home.json"), "[]").unwrap();
    std::fs::write(tmp.path().join("sale-2024.json"), "[]").unwrap();
    std::fs::write(tmp.path().join("README.md"), "notes").unwrap();
    std::fs::write(tmp.path().join("Bad Name.json"), "[]").unwrap();
    std::fs::create_dir_all(tmp.path().join("nested")).unwrap();
    std::fs::write(tmp.path().join("nested/deep.json"), "[]").unwrap();

    let pages = FileSource::new(tmp.path()).pages().expect("pages");
    assert_eq!(pages, ["home", "sale-2024"]);
}

#[test]
fn missing_page_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = FileSource::new(tmp.path()).fetch("nope").unwrap_err();
    assert!(matches!(err, SourceError::PageNotFound(ref p) if p == "nope"));
}

#[test]
fn traversal_slugs_are_rejected_before_io() {
    let tmp = TempDir::new().unwrap();
    let err = FileSource::new(tmp.path()).fetch("../secrets").unwrap_err();
    assert!(matches!(err, SourceError::InvalidSlug(_)));
}

#[test]
fn invalid_json_surfaces_as_payload_error() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("home.json"), "{ not json").unwrap();
    let err = FileSource::new(tmp.path()).fetch("home").unwrap_err();
    assert!(matches!(err, SourceError::Json(_)));
}

#[test]
fn missing_root_cannot_list_pages() {
    let tmp = TempDir::new().unwrap();
    let err = FileSource::new(tmp.path().join("absent")).pages().unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }));
}
