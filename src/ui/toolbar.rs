// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and mode selection UI.
//!
//! This module provides the toolbar with the reset button, the two
//! mutually exclusive pin mode toggles and the viewport readout.

use crate::models::mode::{InteractionMode, ModeController};
use crate::models::viewport::Viewport;

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Reset,
    ToggleAdding,
    ToggleDeleting,
}

/// Display the toolbar.
pub fn show(ui: &mut egui::Ui, modes: &ModeController, viewport: &Viewport) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    let mode = modes.mode();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        if ui.button("Reset").on_hover_text("Fly back to the start view").clicked() {
            action = ToolbarAction::Reset;
        }

        ui.separator();

        // Each toggle is disabled while the other mode is active
        let adding = egui::SelectableLabel::new(mode == InteractionMode::Adding, "Add Pins");
        if ui.add_enabled(modes.can_toggle_adding(), adding).clicked() {
            action = ToolbarAction::ToggleAdding;
        }

        let deleting =
            egui::SelectableLabel::new(mode == InteractionMode::Deleting, "Delete Pins");
        if ui.add_enabled(modes.can_toggle_deleting(), deleting).clicked() {
            action = ToolbarAction::ToggleDeleting;
        }

        ui.separator();

        let hint = match mode {
            InteractionMode::Idle => "Drag to pan, scroll to zoom, click a pin to see its label",
            InteractionMode::Adding => "Click the map to drop a pin, Escape to stop",
            InteractionMode::Deleting => "Click a pin to remove it, Escape to stop",
        };
        ui.label(egui::RichText::new(hint).italics().weak());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.monospace(readout(viewport));
        });
    });

    action
}

/// Viewport readout shown in the toolbar.
pub fn readout(viewport: &Viewport) -> String {
    format!(
        "Longitude: {:.4} | Latitude: {:.4} | Zoom: {:.2}",
        viewport.center.lng, viewport.center.lat, viewport.zoom
    )
}
