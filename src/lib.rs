//! Snake canvas animation crate.
//!
//! A decorative, grid-based snake that chases the visitor's pointer across a
//! portfolio page canvas. The snake advances one cell per fixed tick, eats
//! colored food blocks and grows by recoloring its tail with the eaten color.
//! There is no score and no game over; it is an ambient page effect.
//!
//! The pure state machine lives in [`engine`] and runs under native
//! `cargo test`; browser wiring (canvas, listeners, interval timer) lives in
//! the private `page` module behind [`start_snake`].

use wasm_bindgen::prelude::*;

pub mod engine;
mod page;

pub use engine::{Config, Food, Segment, SnakeEngine, Surface};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Start the animation with the default configuration. A page without the
/// snake canvas gets a silent no-op, not an error.
#[wasm_bindgen]
pub fn start_snake() -> Result<(), JsValue> {
    page::start_with_config(Config::default())
}

/// Start the animation with overrides supplied as JSON from the page, e.g.
/// `{"cell_size": 16, "tick_ms": 80}`. Missing fields keep their defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_snake_with_config(json: &str) -> Result<(), JsValue> {
    let cfg: Config = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("invalid snake config: {e}")))?;
    page::start_with_config(cfg)
}
