//! Build options form
//!
//! Entry script, icon, output options and the two packaging checkboxes.
//! Browsing is reported back to the caller, which owns the file dialogs.

use eframe::egui;

use crate::state::BuildForm;

/// Width of the labels in the left column
const LABEL_WIDTH: f32 = 110.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    BrowseScript,
    BrowseIcon,
    BrowseDistDir,
}

pub struct BuildFormView;

impl BuildFormView {
    pub fn show(ui: &mut egui::Ui, form: &mut BuildForm, enabled: bool) -> Option<FormAction> {
        let mut action = None;

        ui.add_enabled_ui(enabled, |ui| {
            if path_row(ui, "Python script:", &mut form.script_path, "Select the .py or .pyw entry point") {
                action = Some(FormAction::BrowseScript);
            }
            if path_row(ui, "Icon (.ico):", &mut form.icon_path, "Optional; ignored if the file does not exist") {
                action = Some(FormAction::BrowseIcon);
            }

            ui.horizontal(|ui| {
                ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new("App name:"));
                ui.add(
                    egui::TextEdit::singleline(&mut form.app_name)
                        .hint_text("Defaults to the script name")
                        .desired_width(f32::INFINITY),
                );
            });

            if path_row(ui, "Output folder:", &mut form.dist_dir, "Defaults to ./dist") {
                action = Some(FormAction::BrowseDistDir);
            }

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.checkbox(&mut form.onefile, "One file")
                    .on_hover_text("Bundle everything into a single executable");
                ui.checkbox(&mut form.windowed, "Windowed (no console)")
                    .on_hover_text("Do not open a console window for GUI applications");
            });
        });

        action
    }
}

/// Label, text field and a Browse button; returns whether Browse was clicked
fn path_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str) -> bool {
    ui.horizontal(|ui| {
        ui.add_sized([LABEL_WIDTH, 20.0], egui::Label::new(label));
        let browse = ui.button("Browse...").clicked();
        ui.add(
            egui::TextEdit::singleline(value)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        );
        browse
    })
    .inner
}
