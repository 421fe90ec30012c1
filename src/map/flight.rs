// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Fly-to camera animation.
//!
//! Follows the optimal zoom/pan path of van Wijk & Nuij ("Smooth and
//! efficient zooming and panning"): the camera zooms out while it travels
//! and back in as it arrives, at a roughly constant perceived speed.

use crate::models::viewport::{FlyTo, Viewport};
use crate::util::geometry::{
    normalize, project, unproject, world_size, WorldPoint, MAX_ZOOM, MIN_ZOOM,
};

/// Shape of the flight path.
#[derive(Debug, Clone, Copy)]
enum Path {
    /// Pan with a zoom-out arc.
    Curved { r0: f64 },
    /// Center stays put; zoom only. `k` is -1 when zooming in.
    ZoomOnly { k: f64 },
    /// Nothing to animate.
    Instant,
}

/// An animated transition between two viewports.
#[derive(Debug, Clone)]
pub struct Flight {
    start: Viewport,
    target: Viewport,
    /// Start and end centers in pixels at the start zoom.
    from: WorldPoint,
    to: WorldPoint,
    w0: f64,
    u1: f64,
    rho: f64,
    path_length: f64,
    path: Path,
    started_at: f64,
    duration: f64,
}

impl Flight {
    /// Plan a flight from `start` for a screen whose larger side is
    /// `screen_extent` pixels, beginning at time `now` (seconds).
    pub fn new(start: Viewport, command: &FlyTo, screen_extent: f64, now: f64) -> Self {
        let zoom = command.zoom.clamp(MIN_ZOOM, MAX_ZOOM);

        let target = Viewport::new(normalize(command.center), zoom);

        // Take the short way around the antimeridian.
        let mut path_end = target.center;
        let delta = path_end.lng - start.center.lng;
        if delta > 180.0 {
            path_end.lng -= 360.0;
        } else if delta < -180.0 {
            path_end.lng += 360.0;
        }

        let start_scale = 2f64.powf(start.zoom);
        let world = world_size(start.zoom);
        let a = project(start.center);
        let b = project(path_end);
        let from = WorldPoint { x: a.x * world, y: a.y * world };
        let to = WorldPoint { x: b.x * world, y: b.y * world };

        let rho = command.curve.max(f64::EPSILON);
        let rho2 = rho * rho;
        let w0 = screen_extent.max(1.0);
        let w1 = w0 / (2f64.powf(zoom) / start_scale);
        let u1 = ((to.x - from.x).powi(2) + (to.y - from.y).powi(2)).sqrt();

        let r = |end: bool| {
            let (sign, w) = if end { (-1.0, w1) } else { (1.0, w0) };
            let b = (w1 * w1 - w0 * w0 + sign * rho2 * rho2 * u1 * u1) / (2.0 * w * rho2 * u1);
            ((b * b + 1.0).sqrt() - b).ln()
        };

        let r0 = r(false);
        let mut path_length = (r(true) - r0) / rho;
        let mut path = Path::Curved { r0 };

        if u1.abs() < 1e-6 || !path_length.is_finite() {
            if (w0 - w1).abs() < 1e-6 {
                path = Path::Instant;
                path_length = 0.0;
            } else {
                let k = if w1 < w0 { -1.0 } else { 1.0 };
                path = Path::ZoomOnly { k };
                path_length = (w1 / w0).ln().abs() / rho;
            }
        }

        let speed = command.speed.max(f64::EPSILON);
        let duration = path_length / speed;

        log::debug!(
            "Planned flight to ({:.4}, {:.4}) z{:.2}, {:.2}s",
            target.center.lng,
            target.center.lat,
            target.zoom,
            duration
        );

        Self {
            start,
            target,
            from,
            to,
            w0,
            u1,
            rho,
            path_length,
            path,
            started_at: now,
            duration,
        }
    }

    #[cfg(test)]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_finished(&self, now: f64) -> bool {
        now - self.started_at >= self.duration
    }

    /// Camera at time `now`.
    pub fn sample(&self, now: f64) -> Viewport {
        if self.duration <= 0.0 || self.is_finished(now) {
            return self.target;
        }

        let t = ((now - self.started_at) / self.duration).clamp(0.0, 1.0);
        let s = ease_in_out_cubic(t) * self.path_length;
        let rho = self.rho;

        let (w, u) = match self.path {
            Path::Curved { r0 } => {
                let w = r0.cosh() / (r0 + rho * s).cosh();
                let u = self.w0 * ((r0.cosh() * (r0 + rho * s).tanh() - r0.sinh()) / (rho * rho))
                    / self.u1;
                (w, u)
            }
            Path::ZoomOnly { k } => ((k * rho * s).exp(), 0.0),
            Path::Instant => (1.0, 1.0),
        };

        let scale = 1.0 / w;
        let zoom = (self.start.zoom + scale.log2()).clamp(MIN_ZOOM, MAX_ZOOM);
        let world = world_size(self.start.zoom);
        let center = unproject(WorldPoint {
            x: (self.from.x + (self.to.x - self.from.x) * u) / world,
            y: (self.from.y + (self.to.y - self.from.y) * u) / world,
        });

        Viewport::new(normalize(center), zoom)
    }
}

fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::marker::LngLat;
    use approx::assert_abs_diff_eq;

    fn far_away() -> Viewport {
        Viewport::new(LngLat::new(2.35, 48.85), 4.0)
    }

    #[test]
    fn test_flight_starts_at_current_camera() {
        let start = far_away();
        let flight = Flight::new(start, &FlyTo::reset(), 1000.0, 10.0);
        let first = flight.sample(10.0);

        assert_abs_diff_eq!(first.center.lng, start.center.lng, epsilon = 1e-6);
        assert_abs_diff_eq!(first.center.lat, start.center.lat, epsilon = 1e-6);
        assert_abs_diff_eq!(first.zoom, start.zoom, epsilon = 1e-6);
    }

    #[test]
    fn test_flight_ends_at_target() {
        let flight = Flight::new(far_away(), &FlyTo::reset(), 1000.0, 0.0);
        assert!(flight.duration() > 0.0);

        let end = flight.sample(flight.duration() + 0.01);
        assert!(flight.is_finished(flight.duration()));
        assert_eq!(end, Viewport::initial());
    }

    #[test]
    fn test_flight_zooms_out_midway() {
        let start = Viewport::new(LngLat::new(-122.4, 37.8), 12.86);
        let flight = Flight::new(start, &FlyTo::reset(), 1000.0, 0.0);
        let middle = flight.sample(flight.duration() / 2.0);

        assert!(middle.zoom < 12.86);
    }

    #[test]
    fn test_zoom_only_flight_keeps_center() {
        let start = Viewport::new(Viewport::initial().center, 8.0);
        let flight = Flight::new(start, &FlyTo::reset(), 800.0, 0.0);
        assert!(flight.duration() > 0.0);

        let middle = flight.sample(flight.duration() / 2.0);
        assert_abs_diff_eq!(middle.center.lng, start.center.lng, epsilon = 1e-6);
        assert!(middle.zoom > 8.0 && middle.zoom < 12.86);
    }

    #[test]
    fn test_flight_to_current_view_is_instant() {
        let flight = Flight::new(Viewport::initial(), &FlyTo::reset(), 800.0, 3.0);

        assert_eq!(flight.duration(), 0.0);
        assert!(flight.is_finished(3.0));
        assert_eq!(flight.sample(3.0), Viewport::initial());
    }

    #[test]
    fn test_flight_crosses_antimeridian() {
        let start = Viewport::new(LngLat::new(179.0, 0.0), 3.0);
        let command = FlyTo::new(LngLat::new(-179.0, 0.0), 3.0);
        let flight = Flight::new(start, &command, 800.0, 0.0);
        let middle = flight.sample(flight.duration() / 2.0);

        assert!(middle.center.lng.abs() > 178.0);
    }
}
