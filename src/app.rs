// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait, wiring the toolbar, the map canvas and the label
//! prompt to the pin map controller.

use crate::config::AppConfig;
use crate::controller::PinMap;
use crate::map::view::MapView;
use crate::models::mode::InteractionMode;
use crate::models::viewport::Viewport;
use crate::store::marker_store::MarkerStore;
use crate::store::persistence::{FileStore, MarkerPersistence};
use crate::ui::label_prompt::{LabelPrompt, PromptOutcome};
use crate::ui::toolbar::{self, ToolbarAction};
use std::path::PathBuf;

/// Main application state.
pub struct PinMapApp {
    /// Markers, mode and viewport mirror
    pins: PinMap<FileStore>,

    /// Map canvas with the live camera
    map_view: MapView,

    /// Label entry for the pending pin, while one is open
    prompt: Option<LabelPrompt>,
}

impl PinMapApp {
    /// Create a new application instance, loading stored markers.
    pub fn new(config: &AppConfig) -> Self {
        log::info!("Marker storage: {}", config.storage_dir.display());
        let persistence =
            MarkerPersistence::new(FileStore::new(&config.storage_dir), config.marker_slot.clone());
        let store = MarkerStore::load_initial(persistence);

        Self {
            pins: PinMap::new(store),
            map_view: MapView::new(Viewport::initial()),
            prompt: None,
        }
    }

    /// Export markers to a file.
    fn export_markers(&self, path: PathBuf) {
        match crate::io::serialization::export(&self.pins.markers(), &path) {
            Ok(_) => log::info!("Exported markers to {}", path.display()),
            Err(e) => log::error!("Failed to export markers: {:#}", e),
        }
    }

    /// Import markers from a file, replacing the current ones.
    fn import_markers(&mut self, path: PathBuf) {
        let result = crate::io::serialization::import(&path)
            .and_then(|markers| self.pins.import(markers));
        match result {
            Ok(_) => log::info!("Imported markers from {}", path.display()),
            Err(e) => log::error!("Failed to import markers: {:#}", e),
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Import Pins...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Pins", &["json", "yaml", "yml"])
                            .pick_file()
                        {
                            self.import_markers(path);
                        }
                        ui.close_menu();
                    }
                    ui.menu_button("Export Pins", |ui| {
                        if ui.button("Export as JSON...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("JSON", &["json"])
                                .set_file_name("pins.json")
                                .save_file()
                            {
                                self.export_markers(path);
                            }
                            ui.close_menu();
                        }
                        if ui.button("Export as YAML...").clicked() {
                            if let Some(path) = rfd::FileDialog::new()
                                .add_filter("YAML", &["yaml", "yml"])
                                .set_file_name("pins.yaml")
                                .save_file()
                            {
                                self.export_markers(path);
                            }
                            ui.close_menu();
                        }
                    });
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
            });
        });
    }
}

impl eframe::App for PinMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.menu_bar(ctx);

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| {
                toolbar::show(ui, self.pins.modes(), &self.pins.viewport())
            })
            .inner;

        match toolbar_action {
            ToolbarAction::Reset => self.pins.reset(&mut self.map_view),
            ToolbarAction::ToggleAdding => {
                self.pins.toggle_adding();
            }
            ToolbarAction::ToggleDeleting => {
                self.pins.toggle_deleting();
            }
            ToolbarAction::None => {}
        }

        // Escape leaves the active mode unless the prompt consumes it
        if self.prompt.is_none()
            && self.pins.mode() != InteractionMode::Idle
            && ctx.input(|i| i.key_pressed(egui::Key::Escape))
        {
            self.pins.exit_mode();
        }

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Mode: {:?}", self.pins.mode()));
                ui.separator();
                ui.label(format!("Pins: {}", self.pins.store().len()));
            });
        });

        // Map canvas (center)
        let events = egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.pins.sync_markers(&mut self.map_view);
                self.map_view.show(ui, self.pins.subscriptions())
            })
            .inner;

        for event in events {
            if let Err(e) = self.pins.handle_event(event) {
                log::error!("Failed to apply map event: {:#}", e);
            }
        }

        // Label prompt for a pending pin; closes once the request is gone
        if self.pins.pending_pin().is_none() {
            self.prompt = None;
        }
        if let Some(pending) = self.pins.pending_pin() {
            let prompt = self.prompt.get_or_insert_with(LabelPrompt::new);
            let label = match prompt.show(ctx, pending.position) {
                PromptOutcome::Open => None,
                PromptOutcome::Submitted(text) => Some(Some(text)),
                PromptOutcome::Cancelled => Some(None),
            };
            if let Some(label) = label {
                self.prompt = None;
                if let Err(e) = self.pins.submit_label(label.as_deref()) {
                    log::error!("Failed to add pin: {:#}", e);
                }
            }
        }

        if self.pins.needs_redraw() {
            ctx.request_repaint();
        }
    }
}
