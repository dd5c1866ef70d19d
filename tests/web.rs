// Browser smoke test (wasm-pack test --headless). The host page may simply
// not embed the snake canvas; startup must then be a silent no-op.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn start_without_canvas_is_a_silent_no_op() {
    // The bare test document has no #snakeCanvas element.
    assert!(snake_canvas::start_snake().is_ok());
}
