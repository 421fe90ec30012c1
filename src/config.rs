// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Compile-time defaults plus the few values resolved at startup, such as
//! the directory holding the marker store.

use crate::models::marker::LngLat;
use std::path::PathBuf;

/// Identifier used for the window title and the platform data directory.
pub const APP_ID: &str = "Pin Map";

/// Storage slot holding the marker list.
pub const MARKER_SLOT: &str = "my_map_markers";

/// Environment variable overriding the storage directory.
pub const DATA_DIR_ENV: &str = "PINMAP_DATA_DIR";

pub const INITIAL_CENTER: LngLat = LngLat::new(-86.2520, 41.6764);
pub const INITIAL_ZOOM: f64 = 12.86;

/// Runtime configuration of the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub storage_dir: PathBuf,
    pub marker_slot: String,
}

impl AppConfig {
    /// Resolve the configuration from the environment.
    pub fn from_env() -> Self {
        let storage_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| eframe::storage_dir(APP_ID))
            .unwrap_or_else(|| {
                log::warn!("No platform data directory, storing markers in the working directory");
                PathBuf::from(".")
            });

        Self {
            window_size: [1280.0, 720.0],
            min_window_size: [640.0, 480.0],
            storage_dir,
            marker_slot: MARKER_SLOT.to_string(),
        }
    }
}
