// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Marker data structures.
//!
//! This module defines the persisted marker record, the runtime identifier
//! the store assigns to it, and the geographic coordinate type shared with
//! the map surface.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }
}

/// A labeled point of interest.
///
/// Older stores wrote `lng`/`lat`/`description`; those names are accepted
/// on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    #[serde(alias = "lng")]
    pub longitude: f64,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "description")]
    pub label: String,
}

impl Marker {
    /// Create a new marker at the given coordinate.
    pub fn new(longitude: f64, latitude: f64, label: impl Into<String>) -> Self {
        Self {
            longitude,
            latitude,
            label: label.into(),
        }
    }

    pub fn position(&self) -> LngLat {
        LngLat::new(self.longitude, self.latitude)
    }
}

/// Runtime identity of a marker inside the store. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// A marker together with the id the store gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pin {
    pub id: MarkerId,
    pub marker: Marker,
}
