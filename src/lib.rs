// ==================== Imports ====================
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[macro_use]
mod browser;
pub mod animation;
pub mod engine;
pub mod entity;
pub mod game;
pub mod geometry;
pub mod layout;
#[cfg(test)]
mod test_support;

pub use browser::context_for;

use engine::GameLoop;
use game::Bubbles;
use layout::Layout;

// ==================== Main Functions ====================
/// Main entry for Webassembly module, default layout
/// - initializes board
/// - wires canvas + reset button
/// - starts the frame loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    start(Layout::default())
}

/// Same as `main_js`, with a layout object from the page. Missing fields
/// fall back to the defaults.
#[wasm_bindgen]
pub fn main_with_layout(layout: JsValue) -> Result<(), JsValue> {
    let layout: Layout = serde_wasm_bindgen::from_value(layout)
        .map_err(|err| JsValue::from_str(&format!("Invalid layout : {}", err)))?;
    start(layout)
}

fn start(layout: Layout) -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    layout
        .validate()
        .map_err(|err| JsValue::from_str(&format!("{:#}", err)))?;
    log!("Starting with {:?}", layout);

    // spawns a new asynchronous task in local thread, for web assembly
    // environment, using wasm_bindgen_futures
    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(Bubbles::new(layout)).await {
            error!("Could not start game : {:#}", err);
        }
    });

    Ok(())
}
