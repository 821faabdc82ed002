#![allow(clippy::float_cmp)]

use super::*;

fn make_sticker(symbol: &str, x: f64, y: f64) -> StickerObject {
    StickerObject {
        id: new_object_id(),
        symbol: symbol.to_owned(),
        position: Point::new(x, y),
        scale: 100.0,
        rotation: 0.0,
    }
}

fn page_of(stickers: Vec<StickerObject>) -> EditorState {
    EditorState { text: String::new(), stickers }
}

// =============================================================
// Ids
// =============================================================

#[test]
fn new_object_ids_are_unique() {
    let a = new_object_id();
    let b = new_object_id();
    assert_ne!(a, b);
}

#[test]
fn new_object_ids_carry_a_timestamp() {
    let id = new_object_id();
    assert_eq!(id.get_version_num(), 7);
    assert!(id.get_timestamp().is_some());
}

// =============================================================
// EditorState lookups
// =============================================================

#[test]
fn get_finds_sticker_by_id() {
    let s = make_sticker("star", 10.0, 20.0);
    let id = s.id;
    let page = page_of(vec![s]);
    assert_eq!(page.get(&id).map(|s| s.symbol.as_str()), Some("star"));
}

#[test]
fn get_missing_is_none() {
    let page = page_of(vec![make_sticker("star", 10.0, 20.0)]);
    assert!(page.get(&new_object_id()).is_none());
}

#[test]
fn remove_returns_sticker_and_preserves_order() {
    let a = make_sticker("a", 0.0, 0.0);
    let b = make_sticker("b", 0.0, 0.0);
    let c = make_sticker("c", 0.0, 0.0);
    let id_b = b.id;
    let mut page = page_of(vec![a, b, c]);

    let removed = page.remove(&id_b).unwrap();
    assert_eq!(removed.symbol, "b");
    let symbols: Vec<&str> = page.stickers.iter().map(|s| s.symbol.as_str()).collect();
    assert_eq!(symbols, ["a", "c"]);
}

#[test]
fn remove_missing_is_none() {
    let mut page = page_of(vec![make_sticker("a", 0.0, 0.0)]);
    assert!(page.remove(&new_object_id()).is_none());
    assert_eq!(page.len(), 1);
}

// =============================================================
// Z-order
// =============================================================

#[test]
fn bring_to_front_moves_to_end() {
    let a = make_sticker("a", 0.0, 0.0);
    let b = make_sticker("b", 0.0, 0.0);
    let id_a = a.id;
    let mut page = page_of(vec![a, b]);

    assert!(page.bring_to_front(&id_a));
    assert_eq!(page.stickers.last().map(|s| s.id), Some(id_a));
}

#[test]
fn bring_to_front_on_topmost_is_noop() {
    let a = make_sticker("a", 0.0, 0.0);
    let b = make_sticker("b", 0.0, 0.0);
    let id_b = b.id;
    let mut page = page_of(vec![a, b]);
    let before = page.clone();

    assert!(!page.bring_to_front(&id_b));
    assert_eq!(page, before);
}

#[test]
fn bring_to_front_missing_is_noop() {
    let mut page = page_of(vec![make_sticker("a", 0.0, 0.0)]);
    assert!(!page.bring_to_front(&new_object_id()));
}

// =============================================================
// Sanitize
// =============================================================

#[test]
fn sanitize_clamps_scale_and_wraps_rotation() {
    let mut s = make_sticker("a", 0.0, 0.0);
    s.scale = 900.0;
    s.rotation = -30.0;
    s.sanitize(50.0, 300.0, 100.0);
    assert_eq!(s.scale, 300.0);
    assert_eq!(s.rotation, 330.0);
}

#[test]
fn sanitize_replaces_non_finite_values() {
    let mut s = make_sticker("a", f64::NAN, 1.0);
    s.scale = f64::INFINITY;
    s.rotation = f64::NAN;
    s.sanitize(50.0, 300.0, 100.0);
    assert_eq!(s.scale, 100.0);
    assert_eq!(s.rotation, 0.0);
    assert_eq!(s.position, Point::new(50.0, 50.0));
}

// =============================================================
// Serde
// =============================================================

#[test]
fn editor_state_json_shape() {
    let s = make_sticker("heart", 12.5, 40.0);
    let page = EditorState { text: "hello".to_owned(), stickers: vec![s.clone()] };
    let value = serde_json::to_value(&page).unwrap();
    assert_eq!(value["text"], "hello");
    assert_eq!(value["stickers"][0]["symbol"], "heart");
    assert_eq!(value["stickers"][0]["position"]["x"], 12.5);
    assert_eq!(value["stickers"][0]["id"], s.id.to_string());
}

#[test]
fn editor_state_missing_fields_default() {
    let page: EditorState = serde_json::from_str("{}").unwrap();
    assert_eq!(page, EditorState::default());
}
