pub mod app;
pub mod domain;
pub mod shared;

use wasm_bindgen::prelude::wasm_bindgen;

/// Точка входа WASM: журнал в консоль браузера и монтирование приложения
#[wasm_bindgen(start)]
pub fn start() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(app::App);
}
