// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Viewport state and camera commands.

use super::marker::LngLat;
use crate::config::{INITIAL_CENTER, INITIAL_ZOOM};

/// Visible center and zoom level of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LngLat,
    pub zoom: f64,
}

impl Viewport {
    pub const fn new(center: LngLat, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// The viewport the map opens at and the reset action returns to.
    pub const fn initial() -> Self {
        Self::new(INITIAL_CENTER, INITIAL_ZOOM)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::initial()
    }
}

/// Animated camera transition request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTo {
    pub center: LngLat,
    pub zoom: f64,
    /// Degrees clockwise from north.
    pub bearing: f64,
    /// Degrees away from straight down.
    pub pitch: f64,
    /// Average speed of the flight; 1.2 covers one "screenful" in ~0.8s.
    pub speed: f64,
    /// Zoom-out amplitude along the flight path (rho).
    pub curve: f64,
}

impl FlyTo {
    pub const DEFAULT_SPEED: f64 = 1.2;
    pub const DEFAULT_CURVE: f64 = 1.42;

    pub fn new(center: LngLat, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            bearing: 0.0,
            pitch: 0.0,
            speed: Self::DEFAULT_SPEED,
            curve: Self::DEFAULT_CURVE,
        }
    }

    /// Fixed flight back to the initial viewport.
    pub fn reset() -> Self {
        Self::new(INITIAL_CENTER, INITIAL_ZOOM)
    }

    #[cfg(test)]
    pub fn target(&self) -> Viewport {
        Viewport::new(self.center, self.zoom)
    }
}
