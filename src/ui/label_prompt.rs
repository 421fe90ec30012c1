// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Modal prompt asking for the label of a new pin.

use crate::models::marker::LngLat;

/// What the user did with the prompt this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Open,
    Submitted(String),
    Cancelled,
}

/// Resolve this frame's input into an outcome. Cancelling wins over
/// submitting.
fn resolve(text: &str, submitted: bool, cancelled: bool) -> PromptOutcome {
    if cancelled {
        PromptOutcome::Cancelled
    } else if submitted {
        PromptOutcome::Submitted(text.to_owned())
    } else {
        PromptOutcome::Open
    }
}

/// Text entry state of an open prompt.
#[derive(Debug, Default)]
pub struct LabelPrompt {
    text: String,
    focused: bool,
}

impl LabelPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display the prompt window centered over the map.
    pub fn show(&mut self, ctx: &egui::Context, position: LngLat) -> PromptOutcome {
        let mut submitted = false;
        let mut cancelled = false;

        egui::Window::new("New pin")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Enter a description for this place:");
                ui.label(
                    egui::RichText::new(format!("{:.5}, {:.5}", position.lng, position.lat))
                        .monospace()
                        .weak(),
                );

                let response = ui.text_edit_singleline(&mut self.text);
                if !self.focused {
                    response.request_focus();
                    self.focused = true;
                }
                let entered =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.horizontal(|ui| {
                    submitted = ui.button("OK").clicked() || entered;
                    cancelled = ui.button("Cancel").clicked();
                });
            });

        cancelled |= ctx.input(|i| i.key_pressed(egui::Key::Escape));
        resolve(&self.text, submitted, cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_press(key: egui::Key) -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        }
    }

    fn run_frame(
        ctx: &egui::Context,
        prompt: &mut LabelPrompt,
        input: egui::RawInput,
    ) -> PromptOutcome {
        let mut outcome = PromptOutcome::Open;
        let _ = ctx.run(input, |ctx| {
            outcome = prompt.show(ctx, LngLat::new(-86.25, 41.68));
        });
        outcome
    }

    #[test]
    fn test_resolve_enter_or_ok_submits_text() {
        assert_eq!(resolve("Home", true, false), PromptOutcome::Submitted("Home".into()));
        assert_eq!(resolve("", true, false), PromptOutcome::Submitted(String::new()));
    }

    #[test]
    fn test_resolve_cancel_wins() {
        assert_eq!(resolve("Home", false, true), PromptOutcome::Cancelled);
        assert_eq!(resolve("Home", true, true), PromptOutcome::Cancelled);
    }

    #[test]
    fn test_resolve_without_input_stays_open() {
        assert_eq!(resolve("Home", false, false), PromptOutcome::Open);
    }

    #[test]
    fn test_prompt_stays_open_without_input() {
        let ctx = egui::Context::default();
        let mut prompt = LabelPrompt::new();

        for _ in 0..2 {
            let outcome = run_frame(&ctx, &mut prompt, egui::RawInput::default());
            assert_eq!(outcome, PromptOutcome::Open);
        }
    }

    #[test]
    fn test_escape_cancels_prompt() {
        let ctx = egui::Context::default();
        let mut prompt = LabelPrompt::new();
        run_frame(&ctx, &mut prompt, egui::RawInput::default());

        let outcome = run_frame(&ctx, &mut prompt, key_press(egui::Key::Escape));
        assert_eq!(outcome, PromptOutcome::Cancelled);
    }
}
