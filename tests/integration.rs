// Integration tests (native) for the `snake-canvas` crate.
// These tests avoid wasm-specific functionality and exercise pure Rust logic so
// they can run under `cargo test` on the host.

use snake_canvas::Config;

// The documented defaults are the constants the original page shipped with.
#[test]
fn config_defaults_match_documented_constants() {
    let cfg = Config::default();
    assert_eq!(cfg.cell_size, 20);
    assert_eq!(cfg.tick_ms, 100);
    assert_eq!(cfg.initial_segments, 3);
    assert_eq!(cfg.snake_color, "yellow");
    assert_eq!(cfg.palette, vec!["red", "green", "blue", "purple"]);
    assert_eq!(cfg.max_segments, 500);
    assert_eq!(cfg.spawn_attempts, 500);
}

// Page-supplied JSON overrides a subset of fields; the rest keep defaults.
#[cfg(feature = "serde_json")]
#[test]
fn config_json_overrides_subset_of_fields() {
    let cfg: Config = serde_json::from_str(r#"{"cell_size": 16, "tick_ms": 80}"#).unwrap();
    assert_eq!(cfg.cell_size, 16);
    assert_eq!(cfg.tick_ms, 80);
    assert_eq!(cfg.initial_segments, 3);
    assert_eq!(cfg.max_segments, 500);
}
