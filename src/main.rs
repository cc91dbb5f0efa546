//! Task List Frontend Entry Point

mod api;
mod app;
mod components;
mod config;
mod context;
mod controller;
mod debounce;
mod models;
mod reconciler;
mod store;
mod task_list;
mod timer;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use log::LevelFilter;

fn main() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) { LevelFilter::Debug } else { LevelFilter::Info };
    match rolling_logger::init_logger(AppConfig::from_build_env().log_capacity, level) {
        Ok(logger) => log::info!("[APP] Logging at {} ({} records kept)", level, logger.capacity()),
        Err(e) => web_sys::console::error_1(&format!("Failed to install logger: {}", e).into()),
    }

    mount_to_body(App);
}
