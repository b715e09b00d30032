//! Build log view
//!
//! Read-only, monospaced view of the build log. Only the rows in view are
//! laid out, so a build that prints tens of thousands of lines stays smooth.

use eframe::egui;

use super::colors::UiColors;
use crate::state::BuildLog;

/// What the user asked for from the log toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogAction {
    Copy,
    Clear,
}

pub struct LogView;

impl LogView {
    /// Toolbar with auto-scroll, copy and clear
    pub fn toolbar(ui: &mut egui::Ui, log: &BuildLog, auto_scroll: &mut bool) -> Option<LogAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            ui.strong("Build Output");
            ui.separator();
            ui.checkbox(auto_scroll, "Auto-scroll");
            if ui
                .add_enabled(!log.is_empty(), egui::Button::new("Copy log"))
                .clicked()
            {
                action = Some(LogAction::Copy);
            }
            if ui
                .add_enabled(!log.is_empty(), egui::Button::new("Clear log"))
                .clicked()
            {
                action = Some(LogAction::Clear);
            }
            if log.discarded() > 0 {
                ui.weak(format!("({} older lines dropped)", log.discarded()));
            }
        });
        action
    }

    pub fn show(ui: &mut egui::Ui, log: &BuildLog, colors: &UiColors, auto_scroll: bool) {
        let row_height = ui.text_style_height(&egui::TextStyle::Monospace);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            egui::ScrollArea::both()
                .id_salt("build_log")
                .auto_shrink([false, false])
                .stick_to_bottom(auto_scroll)
                .show_rows(ui, row_height, log.len(), |ui, rows| {
                    for index in rows {
                        if let Some(entry) = log.get(index) {
                            ui.label(
                                egui::RichText::new(&entry.text)
                                    .monospace()
                                    .color(colors.for_source(entry.source)),
                            );
                        }
                    }
                });
        });
    }
}
