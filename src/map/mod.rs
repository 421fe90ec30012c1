// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map surface: the rendering collaborator of the pin controller.
//!
//! The controller never draws anything itself. It issues [`MapSurface`]
//! commands and consumes the [`MapEvent`] notifications a surface reports.

pub mod flight;
pub mod view;

use crate::models::marker::{LngLat, Marker, MarkerId};
use crate::models::viewport::{FlyTo, Viewport};

/// Notifications from the map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// The visible viewport changed (pan, zoom, flight).
    Moved(Viewport),
    /// The map background was clicked at a coordinate.
    Clicked(LngLat),
    /// A rendered marker was clicked.
    MarkerClicked(MarkerId),
}

/// Commands accepted by the map surface.
pub trait MapSurface {
    /// Remove every visual marker.
    fn clear_markers(&mut self);

    /// Draw one marker, with its label available as a popup.
    fn add_marker(&mut self, id: MarkerId, marker: &Marker);

    /// Animate the camera to a new viewport.
    fn fly_to(&mut self, command: FlyTo);
}
