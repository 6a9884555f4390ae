//! Browser entry point for the Villani explorer page.
//!
//! Provides the canvas [`Surface`](villani_core::Surface), the
//! `requestAnimationFrame` scheduler and local-storage backing for
//! `villani-page`, then wires the document to a [`villani_page::Page`].

use wasm_bindgen::prelude::*;

pub mod app;
pub mod canvas;
pub mod dom;
pub mod logging;
pub mod math;
pub mod scheduler;
pub mod storage;

pub use canvas::WebCanvas;
pub use scheduler::RafScheduler;
pub use storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn main() {
    logging::set_panic_hook();
    logging::init();

    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() == "loading" {
        dom::listen(&document, "DOMContentLoaded", |_| app::run());
    } else {
        app::run();
    }
}
