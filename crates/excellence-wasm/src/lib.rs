mod api;
mod convert;
mod host;

pub use api::*;
pub use host::CallbackHost;

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
