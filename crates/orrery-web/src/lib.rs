//! Browser bridge for the orrery scene.
//!
//! The host (TypeScript) calls `orrery_init` once, reports each prototype
//! mesh as it loads, then calls `orrery_tick` every animation frame and
//! reads the camera uniform and draw list straight out of wasm memory.

pub mod runner;

pub use runner::WebRunner;

use std::cell::RefCell;

use orrery::InputEvent;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<WebRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut WebRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Orrery not initialized. Call orrery_init() first.");
        f(runner)
    })
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

#[wasm_bindgen]
pub fn orrery_init(config_json: &str, manifest_json: &str, aspect: f32) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = WebRunner::new(config_json, manifest_json, aspect).map_err(|e| {
        log::error!("orrery: init failed: {}", e);
        js_error(&e)
    })?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
    Ok(())
}

/// Returns true once the last prototype has arrived and the scene is built.
#[wasm_bindgen]
pub fn orrery_prototype_loaded(name: &str, mesh: u32, bounding_radius: f32) -> Result<bool, JsValue> {
    with_runner(|r| r.prototype_loaded(name, mesh, bounding_radius)).map_err(|e| {
        log::error!("orrery: {}", e);
        js_error(&e)
    })
}

/// Always throws: a failed load means the scene never composes.
#[wasm_bindgen]
pub fn orrery_asset_failed(name: &str, reason: &str) -> Result<(), JsValue> {
    let message = with_runner(|r| r.asset_failed(name, reason));
    Err(js_error(&message))
}

#[wasm_bindgen]
pub fn orrery_tick(timestamp_ms: f64) {
    with_runner(|r| r.tick(timestamp_ms));
}

// ---- Input (NDC coordinates) ----

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_click() {
    with_runner(|r| r.push_input(InputEvent::Click));
}

#[wasm_bindgen]
pub fn orrery_wheel(delta: f32) {
    with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
}

// ---- UI controls ----

#[wasm_bindgen]
pub fn orrery_set_speed(name: &str, speed: f32) {
    with_runner(|r| r.set_speed(name, speed));
}

#[wasm_bindgen]
pub fn orrery_clear_speed(name: &str) {
    with_runner(|r| r.clear_speed(name));
}

/// Returns the new pause state.
#[wasm_bindgen]
pub fn orrery_toggle_pause() -> bool {
    with_runner(|r| r.toggle_pause())
}

#[wasm_bindgen]
pub fn orrery_set_aspect(aspect: f32) {
    with_runner(|r| r.set_aspect(aspect));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_camera_ptr() -> *const f32 {
    with_runner(|r| r.camera_ptr())
}

#[wasm_bindgen]
pub fn get_camera_floats() -> u32 {
    with_runner(|r| r.camera_floats())
}

#[wasm_bindgen]
pub fn get_draw_ptr() -> *const f32 {
    with_runner(|r| r.draw_ptr())
}

#[wasm_bindgen]
pub fn get_draw_count() -> u32 {
    with_runner(|r| r.draw_count())
}

#[wasm_bindgen]
pub fn get_draw_stride_floats() -> u32 {
    with_runner(|r| r.draw_stride_floats())
}

#[wasm_bindgen]
pub fn get_hover_label() -> Option<String> {
    with_runner(|r| r.hover_label())
}

#[wasm_bindgen]
pub fn get_camera_mode() -> String {
    with_runner(|r| r.camera_mode().to_string())
}

/// JSON array of every renderable, indexed by draw-list slot.
/// `undefined` until the scene is composed.
#[wasm_bindgen]
pub fn get_static_geometry() -> Option<String> {
    with_runner(|r| r.static_geometry())
}

#[wasm_bindgen]
pub fn is_ready() -> bool {
    with_runner(|r| r.is_ready())
}
