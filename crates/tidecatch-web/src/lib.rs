//! Browser exports for Tidecatch.
//!
//! wasm-bindgen cannot export a stateful struct to a plain frame loop, so
//! the runner lives in a `thread_local!` and every export borrows it.
//! Calls made before `game_init` are no-ops returning defaults.

pub mod runner;

use std::cell::RefCell;

use tidecatch::api::types::DeviceTier;
use tidecatch::InputEvent;
use wasm_bindgen::prelude::*;

pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

#[wasm_bindgen]
pub fn game_init(
    config_json: Option<String>,
    catalog_json: Option<String>,
    manifest_json: Option<String>,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = GameRunner::from_json(
        config_json.as_deref(),
        catalog_json.as_deref(),
        manifest_json.as_deref(),
    )
    .map_err(|err| JsValue::from_str(&err.to_string()))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("tidecatch: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- Input ----

#[wasm_bindgen]
pub fn game_key_down(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
}

#[wasm_bindgen]
pub fn game_key_up(key_code: u32) {
    with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
}

/// `tier`: 0 normal, 1 super, 2 hyper.
#[wasm_bindgen]
pub fn game_use_device(tier: u32) {
    match DeviceTier::from_u32(tier) {
        Some(tier) => {
            with_runner(|r| r.push_input(InputEvent::UseDevice { tier }));
        }
        None => log::warn!("unknown device tier {}", tier),
    }
}

#[wasm_bindgen]
pub fn game_flee() {
    with_runner(|r| r.push_input(InputEvent::Flee));
}

#[wasm_bindgen]
pub fn game_resize(width: f32, height: f32) {
    with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
}

// ---- Assets and failures ----

#[wasm_bindgen]
pub fn game_asset_loaded(id: u32) {
    with_runner(|r| r.asset_loaded(id));
}

#[wasm_bindgen]
pub fn game_asset_failed(id: u32) {
    with_runner(|r| r.asset_failed(id));
}

#[wasm_bindgen]
pub fn game_report_render_error(message: &str) {
    with_runner(|r| r.report_render_failure(message));
}

#[wasm_bindgen]
pub fn get_sprite_count() -> u32 {
    with_runner(|r| r.sprite_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_sprite_name(id: u32) -> Option<String> {
    with_runner(|r| r.sprite_name(id)).flatten()
}

#[wasm_bindgen]
pub fn get_sprite_path(id: u32) -> Option<String> {
    with_runner(|r| r.sprite_path(id)).flatten()
}

// ---- Frame data ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    tidecatch::DrawInstance::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_labels_json() -> String {
    with_runner(|r| r.labels_json()).unwrap_or_else(|| "[]".to_string())
}

// ---- UI state ----

#[wasm_bindgen]
pub fn get_status_text() -> String {
    with_runner(|r| r.status_text()).unwrap_or_default()
}

#[wasm_bindgen]
pub fn get_status_visible() -> bool {
    with_runner(|r| r.status_visible()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_flee_visible() -> bool {
    with_runner(|r| r.flee_visible()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn get_device_count(tier: u32) -> u32 {
    with_runner(|r| r.device_count(tier)).unwrap_or(0)
}

/// Name of a species captured for the first time since the last call.
#[wasm_bindgen]
pub fn take_celebration() -> Option<String> {
    with_runner(|r| r.take_celebration()).flatten()
}

#[wasm_bindgen]
pub fn get_collection_json() -> String {
    with_runner(|r| r.collection_json()).unwrap_or_else(|| "[]".to_string())
}

#[wasm_bindgen]
pub fn get_play_time() -> String {
    with_runner(|r| r.play_time()).unwrap_or_default()
}

// ---- Lifecycle ----

#[wasm_bindgen]
pub fn get_phase() -> u32 {
    with_runner(|r| r.phase_code()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_error_message() -> Option<String> {
    with_runner(|r| r.error_message()).flatten()
}

#[wasm_bindgen]
pub fn get_loading_progress() -> f32 {
    with_runner(|r| r.loading_progress()).unwrap_or(0.0)
}
