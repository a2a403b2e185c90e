use anyhow::{anyhow, Result};
use std::future::Future;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::JsCast;

#[rustfmt::skip]
use web_sys::{
    CanvasRenderingContext2d,
    Document,
    Element,
    HtmlCanvasElement,
    Window,
};

// ==================== Logging ====================
// console on wasm32, stdout/stderr everywhere else so native tests can run
// through the same paths without touching JS imports
macro_rules! log {
    ($($t:tt)*) => {
        $crate::browser::log_line(&format!($($t)*))
    };
}

macro_rules! error {
    ($($t:tt)*) => {
        $crate::browser::error_line(&format!($($t)*))
    };
}

#[cfg(target_arch = "wasm32")]
pub fn log_line(line: &str) {
    web_sys::console::log_1(&line.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn log_line(line: &str) {
    println!("{}", line);
}

#[cfg(target_arch = "wasm32")]
pub fn error_line(line: &str) {
    web_sys::console::error_1(&line.into());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error_line(line: &str) {
    eprintln!("{}", line);
}

// ==================== Constants ====================
// Constants related to HTML elements
mod html {
    pub const CANVAS_ID: &str = "gameCanvas";
    pub const RESET_BUTTON_ID: &str = "resetButton";
    pub const CONTEXT_2D: &str = "2d";
}

pub type LoopClosure = Closure<dyn FnMut(f64)>;

// ==================== DOM ====================
pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

pub fn canvas() -> Result<HtmlCanvasElement> {
    document()?
        .get_element_by_id(html::CANVAS_ID)
        .ok_or_else(|| anyhow!("No Canvas Element found with ID : '{:#?}'", html::CANVAS_ID))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|element| anyhow!("Error converting {:#?} to HtmlCanvasElement", element))
}

pub fn reset_button() -> Result<Element> {
    document()?
        .get_element_by_id(html::RESET_BUTTON_ID)
        .ok_or_else(|| anyhow!("No Element found with ID : '{:#?}'", html::RESET_BUTTON_ID))
}

pub fn context() -> Result<CanvasRenderingContext2d> {
    context_for(&canvas()?)
}

/// 2d context of a given canvas
/// - get_context returns Result<Option<Object>, JsValue>
/// - JsValue error -> anyhow, None -> anyhow, Object -> dyn_into
pub fn context_for(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d> {
    canvas
        .get_context(html::CONTEXT_2D)
        .map_err(|js_value| anyhow!("Error getting context : {:#?}", js_value))?
        .ok_or_else(|| anyhow!("No 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "Error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

/// On-screen top-left corner of the drawing surface, in client coordinates.
/// Read at click time since the page can scroll or reflow between clicks.
pub fn surface_offset(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (rect.left(), rect.top())
}

// ==================== Timing ====================
/// Monotonic milliseconds, same clock requestAnimationFrame stamps frames with
pub fn now() -> Result<f64> {
    Ok(window()?
        .performance()
        .ok_or_else(|| anyhow!("Performance object not found"))?
        .now())
}

pub fn request_animation_frame(callback: &LoopClosure) -> Result<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot request animation frame {:#?}", err))
}

pub fn create_raf_closure(f: impl FnMut(f64) + 'static) -> LoopClosure {
    closure_wrap(Box::new(f))
}

pub fn closure_wrap<T: WasmClosure + ?Sized>(data: Box<T>) -> Closure<T> {
    Closure::wrap(data)
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
