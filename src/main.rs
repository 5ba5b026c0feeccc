//! Floating Todo Content Script Entry Point

mod app;
mod components;
mod context;
mod store;

use app::App;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();
    let _ = rolling_logger::init("content", LevelFilter::Info);
    mount_to_body(App);
}
