//! Bundled resources panel
//!
//! Lists the extra files and folders with their `FILE: `/`DIR:  ` rows.
//! Click selects a row; Ctrl/Cmd or Shift click adds to the selection.

use eframe::egui;

use crate::state::BuildForm;

/// Height of the list area
const LIST_HEIGHT: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceAction {
    AddFiles,
    AddFolder,
    RemoveSelected,
}

pub struct ResourceListView;

impl ResourceListView {
    pub fn show(ui: &mut egui::Ui, form: &mut BuildForm, enabled: bool) -> Option<ResourceAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            ui.label("Additional files and folders:");
            if ui.add_enabled(enabled, egui::Button::new("Add File(s)")).clicked() {
                action = Some(ResourceAction::AddFiles);
            }
            if ui.add_enabled(enabled, egui::Button::new("Add Folder")).clicked() {
                action = Some(ResourceAction::AddFolder);
            }
            let can_remove = enabled && !form.selection().is_empty();
            if ui
                .add_enabled(can_remove, egui::Button::new("Remove Selected"))
                .clicked()
            {
                action = Some(ResourceAction::RemoveSelected);
            }
        });

        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("resource_list")
                .max_height(LIST_HEIGHT)
                .min_scrolled_height(LIST_HEIGHT)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    if form.resources.is_empty() {
                        ui.weak("No additional files.");
                        return;
                    }

                    let rows = form.resources.display_rows();
                    for (index, row) in rows.into_iter().enumerate() {
                        let selected = form.is_selected(index);
                        let response = ui.selectable_label(selected, egui::RichText::new(row).monospace());
                        if response.clicked() {
                            let extend = ui.input(|i| i.modifiers.command || i.modifiers.shift);
                            form.select(index, extend);
                        }
                    }
                });
        });

        action
    }
}
