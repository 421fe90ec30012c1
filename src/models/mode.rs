// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Interaction modes.
//!
//! The mode decides how clicks on the map and on markers are interpreted.
//! Adding and deleting are mutually exclusive: while one is active the
//! control entering the other is disabled.

/// Current interpretation of map and marker clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Adding,
    Deleting,
}

/// Two-state (plus idle) mode machine.
#[derive(Debug, Default)]
pub struct ModeController {
    mode: InteractionMode,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Whether the "add pins" control is enabled.
    pub fn can_toggle_adding(&self) -> bool {
        self.mode != InteractionMode::Deleting
    }

    /// Whether the "delete pins" control is enabled.
    pub fn can_toggle_deleting(&self) -> bool {
        self.mode != InteractionMode::Adding
    }

    /// Enter or leave adding mode. No-op while deleting.
    pub fn toggle_adding(&mut self) -> InteractionMode {
        self.mode = match self.mode {
            InteractionMode::Idle => InteractionMode::Adding,
            InteractionMode::Adding => InteractionMode::Idle,
            InteractionMode::Deleting => InteractionMode::Deleting,
        };
        self.mode
    }

    /// Enter or leave deleting mode. No-op while adding.
    pub fn toggle_deleting(&mut self) -> InteractionMode {
        self.mode = match self.mode {
            InteractionMode::Idle => InteractionMode::Deleting,
            InteractionMode::Deleting => InteractionMode::Idle,
            InteractionMode::Adding => InteractionMode::Adding,
        };
        self.mode
    }

    /// Return to idle from whatever mode is active.
    pub fn exit(&mut self) -> InteractionMode {
        self.mode = InteractionMode::Idle;
        self.mode
    }
}

/// Which map notifications the core listens to.
///
/// Recomputed from the mode every frame instead of attaching and detaching
/// handlers, so a handler can never outlive the mode that wanted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Subscriptions {
    /// Clicks on the map background.
    pub map_click: bool,
    /// Clicks on individual rendered markers.
    pub marker_click: bool,
}

impl Subscriptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_mode(mode: InteractionMode) -> Self {
        Self {
            map_click: mode == InteractionMode::Adding,
            marker_click: mode == InteractionMode::Deleting,
        }
    }
}
