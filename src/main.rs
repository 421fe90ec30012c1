// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pin Map
//!
//! A cross-platform desktop map on which labeled pins can be dropped and
//! removed. Pins are saved locally and restored on the next start.

mod app;
mod config;
mod controller;
mod io;
mod map;
mod models;
mod store;
mod ui;
mod util;

use anyhow::Result;
use app::PinMapApp;
use config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = AppConfig::from_env();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(config::APP_ID),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        config::APP_ID,
        options,
        Box::new(move |_cc| Ok(Box::new(PinMapApp::new(&config)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
