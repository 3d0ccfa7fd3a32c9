use eframe::egui::{
    Align, Align2, Button, CentralPanel, Context, Id, Key, Layout, RichText, TextEdit, Window,
    vec2,
};

use crate::ui::{UI_CONFIG, UI_TEXT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// Trimmed, non-empty id.
    Submit(String),
    /// The input was edited while an error was showing.
    InputEdited,
    /// "Clear" pressed: input already emptied.
    Cleared,
}

/// Trimmed input when it may be submitted.
fn submittable(input: &str, is_validating: bool) -> Option<String> {
    let trimmed = input.trim();
    (!is_validating && !trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blocking user id prompt. Nothing else is drawn while it is open.
pub(crate) fn render_gate(
    ctx: &Context,
    input: &mut String,
    is_validating: bool,
    error: Option<&str>,
) -> Option<GateAction> {
    let mut action = None;

    CentralPanel::default()
        .frame(UI_CONFIG.central_panel_frame())
        .show(ctx, |_ui| {});

    Window::new(UI_TEXT.modal_title.as_str())
        .id(Id::new("user_id_modal"))
        .collapsible(false)
        .resizable(false)
        .movable(false)
        .default_width(UI_CONFIG.modal_width)
        .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(UI_TEXT.modal_description.as_str());
            ui.add_space(12.0);

            ui.label(RichText::new(UI_TEXT.modal_label.as_str()).strong());
            let response = ui.add_enabled(
                !is_validating,
                TextEdit::singleline(input)
                    .hint_text(UI_TEXT.modal_placeholder.as_str())
                    .desired_width(f32::INFINITY),
            );
            if !is_validating && !response.has_focus() && input.is_empty() {
                response.request_focus();
            }
            if response.changed() && error.is_some() {
                action = Some(GateAction::InputEdited);
            }
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

            if let Some(message) = error {
                ui.add_space(6.0);
                ui.label(
                    RichText::new(format!("{} {}", UI_TEXT.modal_error_prefix, message))
                        .small()
                        .strong()
                        .color(UI_CONFIG.colors.error_text),
                );
            }

            ui.add_space(10.0);
            ui.label(RichText::new(UI_TEXT.modal_signup_hint.as_str()).small());
            ui.add_space(12.0);

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let ready = submittable(input, is_validating);
                let submit_text = if is_validating {
                    &UI_TEXT.modal_validating
                } else {
                    &UI_TEXT.modal_submit
                };
                let submit = ui.add_enabled(ready.is_some(), Button::new(submit_text.as_str()));
                if let Some(id) = ready
                    && (submit.clicked() || enter_pressed)
                {
                    action = Some(GateAction::Submit(id));
                }

                if ui
                    .add_enabled(!is_validating, Button::new(UI_TEXT.modal_clear.as_str()))
                    .clicked()
                {
                    input.clear();
                    action = Some(GateAction::Cleared);
                }
            });
        });

    action
}
