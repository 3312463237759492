// Entry point the host page loads; the gallery itself lives in photo_carousel.

use wasm_bindgen::prelude::*;
use web_sys::console;

pub(crate) fn main_wasm() -> Result<(), JsValue> {
    console::log_1(
        &format!(
            "Starting photo gallery {} (gallery_wasm {})",
            photo_carousel::VERSION,
            env!("CARGO_PKG_VERSION")
        )
        .into(),
    );
    photo_carousel::run();
    Ok(())
}
