// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pin map controller.
//!
//! Owns all mutable state of the widget (markers, interaction mode,
//! viewport mirror, pending label request) and interprets map
//! notifications according to the current mode. The UI layer passes it
//! around by reference; nothing here is global.

use crate::map::{MapEvent, MapSurface};
use crate::models::marker::{LngLat, Marker, MarkerId};
use crate::models::mode::{InteractionMode, ModeController, Subscriptions};
use crate::models::viewport::{FlyTo, Viewport};
use crate::store::marker_store::MarkerStore;
use crate::store::persistence::KeyValueStore;
use anyhow::Result;

/// A map click in adding mode waiting for its label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingPin {
    pub position: LngLat,
}

/// Top-level state of the pin map.
pub struct PinMap<S> {
    store: MarkerStore<S>,
    modes: ModeController,
    viewport: Viewport,
    pending: Option<PendingPin>,
    /// Markers changed since the surface last drew them.
    dirty: bool,
}

impl<S: KeyValueStore> PinMap<S> {
    pub fn new(store: MarkerStore<S>) -> Self {
        Self {
            store,
            modes: ModeController::new(),
            viewport: Viewport::initial(),
            pending: None,
            dirty: true,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.modes.mode()
    }

    pub fn modes(&self) -> &ModeController {
        &self.modes
    }

    pub fn toggle_adding(&mut self) -> InteractionMode {
        let before = self.modes.mode();
        let mode = self.modes.toggle_adding();
        self.after_mode_change(before, mode);
        mode
    }

    pub fn toggle_deleting(&mut self) -> InteractionMode {
        let before = self.modes.mode();
        let mode = self.modes.toggle_deleting();
        self.after_mode_change(before, mode);
        mode
    }

    /// Leave the active mode, if any.
    pub fn exit_mode(&mut self) -> InteractionMode {
        let before = self.modes.mode();
        let mode = self.modes.exit();
        self.after_mode_change(before, mode);
        mode
    }

    fn after_mode_change(&mut self, before: InteractionMode, after: InteractionMode) {
        if before == after {
            return;
        }
        log::info!("Interaction mode {:?} -> {:?}", before, after);

        // A label request belongs to the adding mode that produced it
        if after != InteractionMode::Adding && self.pending.take().is_some() {
            log::debug!("Dropped pending pin on leaving adding mode");
        }
    }

    /// Notifications the surface should report this frame.
    ///
    /// Nothing is subscribed while a label prompt is open.
    pub fn subscriptions(&self) -> Subscriptions {
        if self.pending.is_some() {
            Subscriptions::none()
        } else {
            Subscriptions::for_mode(self.modes.mode())
        }
    }

    /// Last viewport reported by the surface.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pending_pin(&self) -> Option<PendingPin> {
        self.pending
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.store.markers()
    }

    pub fn store(&self) -> &MarkerStore<S> {
        &self.store
    }

    /// Whether the surface shows an outdated marker set.
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Interpret one notification from the map surface.
    pub fn handle_event(&mut self, event: MapEvent) -> Result<()> {
        let subscriptions = self.subscriptions();
        match event {
            MapEvent::Moved(viewport) => {
                self.viewport = viewport;
            }
            MapEvent::Clicked(position) if subscriptions.map_click => {
                log::debug!("Requesting label for ({:.5}, {:.5})", position.lng, position.lat);
                self.pending = Some(PendingPin { position });
            }
            MapEvent::MarkerClicked(id) if subscriptions.marker_click => {
                self.remove(id)?;
            }
            MapEvent::Clicked(_) | MapEvent::MarkerClicked(_) => {}
        }
        Ok(())
    }

    /// Resolve the pending pin with the label the user typed.
    ///
    /// `None` or a blank label cancels the pin.
    pub fn submit_label(&mut self, label: Option<&str>) -> Result<Option<MarkerId>> {
        let Some(pending) = self.pending.take() else {
            return Ok(None);
        };
        let Some(label) = label else {
            log::debug!("Label prompt cancelled");
            return Ok(None);
        };

        let id = self
            .store
            .add(pending.position.lng, pending.position.lat, label)?;
        if id.is_some() {
            self.dirty = true;
        }
        Ok(id)
    }

    fn remove(&mut self, id: MarkerId) -> Result<()> {
        if self.store.remove(id)?.is_some() {
            self.dirty = true;
        }
        Ok(())
    }

    /// Replace every marker with an imported list.
    pub fn import(&mut self, markers: Vec<Marker>) -> Result<()> {
        self.store.replace_all(markers)?;
        self.dirty = true;
        Ok(())
    }

    /// Fly back to the initial viewport.
    pub fn reset(&self, surface: &mut impl MapSurface) {
        log::info!("Resetting viewport");
        surface.fly_to(FlyTo::reset());
    }

    /// Redraw the surface's markers if they changed.
    ///
    /// Always clears every visual marker first, then draws the whole list.
    pub fn sync_markers(&mut self, surface: &mut impl MapSurface) {
        if !self.dirty {
            return;
        }
        surface.clear_markers();
        for pin in self.store.pins() {
            surface.add_marker(pin.id, &pin.marker);
        }
        self.dirty = false;
    }
}
