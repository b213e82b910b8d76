// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Lectern - Main Entry Point
//!
//! A markdown study editor with inline scripture references. Built with
//! Rust and egui.

mod app;
mod config;
mod editor;
mod error;
mod files;
mod history;
mod scripture;
mod session;
mod state;
mod theme;
mod ui;

use app::LecternApp;
use config::load_config;
use log::info;

/// Application name constant.
const APP_NAME: &str = "Lectern";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    // Load settings to get window configuration
    let settings = load_config();
    let window_size = settings.window_size;

    info!(
        "Window configuration: {}x{}",
        window_size.width, window_size.height
    );

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([400.0, 300.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(LecternApp::new(cc)))),
    )
}
