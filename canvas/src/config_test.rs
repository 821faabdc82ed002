#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_constants() {
    let cfg = EditorConfig::default();
    assert_eq!(cfg.scale_min, 50.0);
    assert_eq!(cfg.scale_max, 300.0);
    assert_eq!(cfg.rotate_step_deg, 5.0);
    assert_eq!(cfg.scale_step, 5.0);
    assert_eq!(cfg.history_cap, 20);
    assert_eq!(cfg.spawn_min_pct, 20.0);
    assert_eq!(cfg.spawn_max_pct, 80.0);
}

#[test]
fn sanitized_defaults_are_unchanged() {
    assert_eq!(EditorConfig::default().sanitized(), EditorConfig::default());
}

#[test]
fn sanitized_swaps_inverted_ranges() {
    let cfg = EditorConfig {
        scale_min: 400.0,
        scale_max: 25.0,
        spawn_min_pct: 90.0,
        spawn_max_pct: 10.0,
        ..Default::default()
    }
    .sanitized();
    assert_eq!((cfg.scale_min, cfg.scale_max), (25.0, 400.0));
    assert_eq!((cfg.spawn_min_pct, cfg.spawn_max_pct), (10.0, 90.0));
}

#[test]
fn sanitized_replaces_non_finite_and_degenerate_values() {
    let cfg = EditorConfig {
        scale_min: f64::NAN,
        rotate_step_deg: f64::INFINITY,
        scale_step: -3.0,
        history_cap: 0,
        sticker_base_px: -1.0,
        ..Default::default()
    }
    .sanitized();
    assert_eq!(cfg.scale_min, 50.0);
    assert_eq!(cfg.rotate_step_deg, 5.0);
    assert_eq!(cfg.scale_step, 3.0);
    assert_eq!(cfg.history_cap, 1);
    assert_eq!(cfg.sticker_base_px, 48.0);
}

#[test]
fn sanitized_keeps_spawn_range_on_the_page() {
    let cfg = EditorConfig { spawn_min_pct: -1e308, spawn_max_pct: 1e308, ..Default::default() }.sanitized();
    assert_eq!((cfg.spawn_min_pct, cfg.spawn_max_pct), (0.0, 100.0));

    let off_page = EditorConfig { spawn_min_pct: 140.0, spawn_max_pct: 120.0, ..Default::default() }.sanitized();
    assert_eq!((off_page.spawn_min_pct, off_page.spawn_max_pct), (100.0, 100.0));
}

#[test]
fn sanitized_pulls_default_scale_into_range() {
    let cfg = EditorConfig { scale_min: 150.0, scale_max: 200.0, ..Default::default() }.sanitized();
    assert_eq!(cfg.scale_default, 150.0);
}

#[test]
fn deserialize_partial_fills_defaults() {
    let cfg: EditorConfig = serde_json::from_str(r#"{"history_cap": 5}"#).unwrap();
    assert_eq!(cfg.history_cap, 5);
    assert_eq!(cfg.scale_max, 300.0);
}
