//! Canvas + DOM wiring for the snake animation.
//!
//! The hosting page provides a `<canvas id="snakeCanvas">`; this module looks
//! it up, sizes the backing store to the element's rendered size, installs the
//! pointer / touch / resize listeners and runs the engine off an interval
//! timer. A page without the canvas simply does not get the animation - that
//! is a supported configuration, not an error.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, CanvasRenderingContext2d, HtmlCanvasElement, window};

use crate::engine::{Config, SnakeEngine, Surface};

const CANVAS_ID: &str = "snakeCanvas";

struct PageState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    engine: SnakeEngine,
    timer: Option<TickTimer>,
}

// One animation per page; the engine itself is instance-scoped, only this
// boundary cell is ambient so event closures can reach the state.
thread_local! {
    static PAGE_STATE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

// --- Tick timer --------------------------------------------------------------

/// Interval handle that clears itself when dropped, so swapping in a fresh
/// timer on resize can never leave two ticks running.
struct TickTimer {
    handle: i32,
    _closure: Closure<dyn FnMut()>,
}

impl TickTimer {
    fn start(tick_ms: u32) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(move || {
            PAGE_STATE.with(|cell| {
                if let Some(page) = cell.borrow_mut().as_mut() {
                    if page.engine.step() {
                        let mut surface = CanvasSurface { ctx: &page.ctx };
                        page.engine.render(&mut surface);
                    }
                }
            });
        }) as Box<dyn FnMut()>);
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            tick_ms as i32,
        )?;
        Ok(Self {
            handle,
            _closure: closure,
        })
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        if let Some(win) = window() {
            win.clear_interval_with_handle(self.handle);
        }
    }
}

// --- Canvas surface -----------------------------------------------------------

struct CanvasSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str, line_width: f64) {
        self.ctx.set_stroke_style(&JsValue::from_str(color));
        self.ctx.set_line_width(line_width);
        self.ctx.stroke_rect(x, y, w, h);
    }
}

// --- Startup -----------------------------------------------------------------

pub fn start_with_config(cfg: Config) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // No canvas on this page: the animation is simply absent.
    let Some(el) = doc.get_element_by_id(CANVAS_ID) else {
        return Ok(());
    };
    let canvas: HtmlCanvasElement = el.dyn_into()?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let (width, height) = fit_canvas(&canvas);
    let mut engine = SnakeEngine::new(cfg, seed());
    engine.reset(width, height);
    let timer = TickTimer::start(engine.config().tick_ms)?;

    PAGE_STATE.with(|cell| {
        cell.replace(Some(PageState {
            canvas: canvas.clone(),
            ctx,
            engine,
            timer: Some(timer),
        }))
    });

    install_pointer_listeners(&canvas)?;
    install_resize_listener(&win)?;
    redraw();
    Ok(())
}

/// Size the canvas backing store to the element's rendered size and return it.
fn fit_canvas(canvas: &HtmlCanvasElement) -> (i32, i32) {
    let width = canvas.offset_width().max(0);
    let height = canvas.offset_height().max(0);
    canvas.set_width(width as u32);
    canvas.set_height(height as u32);
    (width, height)
}

fn seed() -> u64 {
    #[cfg(feature = "rng")]
    {
        let mut bytes = [0u8; 8];
        if getrandom::getrandom(&mut bytes).is_ok() {
            return u64::from_le_bytes(bytes);
        }
    }
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
        .to_bits()
}

// --- Listeners ---------------------------------------------------------------

fn install_pointer_listeners(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // Mouse: offset coordinates are already canvas-local.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            retarget(evt.offset_x() as f64, evt.offset_y() as f64);
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Touch: first contact point, made canvas-local via the bounding rect.
    // Registered non-passive so preventDefault can stop the page scrolling.
    {
        let touch_canvas = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            evt.prevent_default();
            if let Some(touch) = evt.touches().get(0) {
                let rect = touch_canvas.get_bounding_client_rect();
                retarget(
                    touch.client_x() as f64 - rect.left(),
                    touch.client_y() as f64 - rect.top(),
                );
            }
        }) as Box<dyn FnMut(_)>);
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        canvas.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        closure.forget();
    }
    Ok(())
}

fn install_resize_listener(win: &web_sys::Window) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move || {
        PAGE_STATE.with(|cell| {
            if let Some(page) = cell.borrow_mut().as_mut() {
                // Drop the old interval before installing its replacement so
                // at most one tick timer is ever live.
                page.timer = None;
                let (width, height) = fit_canvas(&page.canvas);
                page.engine.resize(width, height);
                page.timer = TickTimer::start(page.engine.config().tick_ms).ok();
                let mut surface = CanvasSurface { ctx: &page.ctx };
                page.engine.render(&mut surface);
            }
        });
    }) as Box<dyn FnMut()>);
    win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn retarget(x: f64, y: f64) {
    PAGE_STATE.with(|cell| {
        if let Some(page) = cell.borrow_mut().as_mut() {
            page.engine.set_target(x, y);
        }
    });
}

fn redraw() {
    PAGE_STATE.with(|cell| {
        if let Some(page) = cell.borrow_mut().as_mut() {
            let mut surface = CanvasSurface { ctx: &page.ctx };
            page.engine.render(&mut surface);
        }
    });
}
