// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the Web Mercator projection and the transform
//! between geographic coordinates and screen pixels for a given viewport.

use crate::models::marker::LngLat;
use crate::models::viewport::Viewport;
use std::f64::consts::PI;

/// Width of the whole world in pixels at zoom 0.
pub const TILE_SIZE: f64 = 512.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

/// A point in normalized Mercator space, `(0, 0)` top-left, `(1, 1)` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Project a coordinate into normalized Mercator space.
pub fn project(position: LngLat) -> WorldPoint {
    let lat = position.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    WorldPoint {
        x: (position.lng + 180.0) / 360.0,
        y: (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0,
    }
}

/// Inverse of [`project`].
pub fn unproject(point: WorldPoint) -> LngLat {
    let lat = (PI * (1.0 - 2.0 * point.y)).sinh().atan().to_degrees();
    LngLat::new(point.x * 360.0 - 180.0, lat)
}

/// World width in pixels at `zoom`.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Wrap longitude into `[-180, 180)` and clamp latitude to the projection.
pub fn normalize(position: LngLat) -> LngLat {
    let lng = if (-180.0..=180.0).contains(&position.lng) {
        position.lng
    } else {
        (position.lng + 180.0).rem_euclid(360.0) - 180.0
    };
    LngLat::new(lng, position.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE))
}

/// Maps geographic coordinates to screen pixels for one viewport.
#[derive(Debug, Clone, Copy)]
pub struct ScreenTransform {
    center: WorldPoint,
    scale: f64,
    screen_center: (f64, f64),
}

impl ScreenTransform {
    /// `screen_center` is the pixel position the viewport center is drawn at.
    pub fn new(viewport: &Viewport, screen_center: (f64, f64)) -> Self {
        Self {
            center: project(viewport.center),
            scale: world_size(viewport.zoom),
            screen_center,
        }
    }

    /// Screen pixel of a coordinate.
    pub fn to_screen(&self, position: LngLat) -> (f64, f64) {
        let p = project(position);
        (
            self.screen_center.0 + (p.x - self.center.x) * self.scale,
            self.screen_center.1 + (p.y - self.center.y) * self.scale,
        )
    }

    /// Coordinate under a screen pixel.
    pub fn to_lng_lat(&self, screen: (f64, f64)) -> LngLat {
        unproject(WorldPoint {
            x: self.center.x + (screen.0 - self.screen_center.0) / self.scale,
            y: self.center.y + (screen.1 - self.screen_center.1) / self.scale,
        })
    }

    /// Pixels per degree of longitude.
    pub fn pixels_per_degree(&self) -> f64 {
        self.scale / 360.0
    }
}

/// Move the viewport so the map follows a drag of `delta` pixels.
pub fn pan(viewport: &Viewport, delta: (f64, f64)) -> Viewport {
    let scale = world_size(viewport.zoom);
    let c = project(viewport.center);
    let center = unproject(WorldPoint {
        x: c.x - delta.0 / scale,
        y: (c.y - delta.1 / scale).clamp(0.0, 1.0),
    });
    Viewport::new(normalize(center), viewport.zoom)
}

/// Change zoom by `delta` levels keeping the coordinate under `anchor` fixed.
///
/// `anchor` is relative to the screen position of the viewport center.
pub fn zoom_around(viewport: &Viewport, delta: f64, anchor: (f64, f64)) -> Viewport {
    let zoom = (viewport.zoom + delta).clamp(MIN_ZOOM, MAX_ZOOM);
    let c = project(viewport.center);
    let old_scale = world_size(viewport.zoom);
    let new_scale = world_size(zoom);

    let anchor_world = WorldPoint {
        x: c.x + anchor.0 / old_scale,
        y: c.y + anchor.1 / old_scale,
    };
    let center = unproject(WorldPoint {
        x: anchor_world.x - anchor.0 / new_scale,
        y: (anchor_world.y - anchor.1 / new_scale).clamp(0.0, 1.0),
    });
    Viewport::new(normalize(center), zoom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_project_unproject_roundtrip() {
        let position = LngLat::new(-86.2520, 41.6764);
        let back = unproject(project(position));

        assert_abs_diff_eq!(back.lng, position.lng, epsilon = 1e-9);
        assert_abs_diff_eq!(back.lat, position.lat, epsilon = 1e-9);
    }

    #[test]
    fn test_project_corners() {
        let origin = project(LngLat::new(0.0, 0.0));
        assert_abs_diff_eq!(origin.x, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(origin.y, 0.5, epsilon = 1e-12);

        let top_left = project(LngLat::new(-180.0, MAX_LATITUDE));
        assert_abs_diff_eq!(top_left.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(top_left.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_screen_transform_center_and_inverse() {
        let viewport = Viewport::initial();
        let transform = ScreenTransform::new(&viewport, (400.0, 300.0));

        let (x, y) = transform.to_screen(viewport.center);
        assert_abs_diff_eq!(x, 400.0, epsilon = 1e-6);
        assert_abs_diff_eq!(y, 300.0, epsilon = 1e-6);

        let clicked = transform.to_lng_lat((523.0, 187.0));
        let (sx, sy) = transform.to_screen(clicked);
        assert_abs_diff_eq!(sx, 523.0, epsilon = 1e-6);
        assert_abs_diff_eq!(sy, 187.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pan_moves_opposite_to_drag() {
        let viewport = Viewport::new(LngLat::new(0.0, 0.0), 2.0);
        let moved = pan(&viewport, (100.0, 0.0));

        assert!(moved.center.lng < 0.0);
        assert_abs_diff_eq!(moved.center.lat, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(moved.zoom, 2.0);
    }

    #[test]
    fn test_zoom_around_keeps_anchor_fixed() {
        let viewport = Viewport::new(LngLat::new(10.0, 20.0), 5.0);
        let anchor = (120.0, -80.0);
        let before = ScreenTransform::new(&viewport, (0.0, 0.0)).to_lng_lat(anchor);

        let zoomed = zoom_around(&viewport, 1.5, anchor);
        let after = ScreenTransform::new(&zoomed, (0.0, 0.0)).to_lng_lat(anchor);

        assert_abs_diff_eq!(zoomed.zoom, 6.5);
        assert_abs_diff_eq!(before.lng, after.lng, epsilon = 1e-9);
        assert_abs_diff_eq!(before.lat, after.lat, epsilon = 1e-9);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let viewport = Viewport::new(LngLat::new(0.0, 0.0), 21.5);
        assert_abs_diff_eq!(zoom_around(&viewport, 3.0, (0.0, 0.0)).zoom, MAX_ZOOM);
    }

    #[test]
    fn test_normalize_wraps_longitude() {
        let wrapped = normalize(LngLat::new(190.0, 89.0));
        assert_abs_diff_eq!(wrapped.lng, -170.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wrapped.lat, MAX_LATITUDE);
    }
}
