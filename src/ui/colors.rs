//! Color utilities for UI rendering
//!
//! Maps the configured theme to egui visuals and picks the color of each
//! log entry.

use eframe::egui;

use crate::config::Theme;
use crate::models::LogLevel;
use crate::state::LogSource;

/// Colors used by the window for one theme
#[derive(Debug, Clone, PartialEq)]
pub struct UiColors {
    pub foreground: egui::Color32,
    pub muted: egui::Color32,
    pub accent: egui::Color32,
    pub success: egui::Color32,
    pub error: egui::Color32,
    pub warning: egui::Color32,
    pub selection: egui::Color32,
}

impl UiColors {
    pub fn dark() -> Self {
        Self {
            foreground: egui::Color32::from_rgb(220, 220, 220),
            muted: egui::Color32::from_rgb(140, 140, 150),
            accent: egui::Color32::from_rgb(100, 170, 255),
            success: egui::Color32::from_rgb(110, 210, 120),
            error: egui::Color32::from_rgb(240, 100, 100),
            warning: egui::Color32::from_rgb(235, 195, 90),
            selection: egui::Color32::from_rgb(50, 80, 120),
        }
    }

    pub fn light() -> Self {
        Self {
            foreground: egui::Color32::from_rgb(30, 30, 30),
            muted: egui::Color32::from_rgb(110, 110, 120),
            accent: egui::Color32::from_rgb(20, 90, 200),
            success: egui::Color32::from_rgb(20, 130, 40),
            error: egui::Color32::from_rgb(190, 30, 30),
            warning: egui::Color32::from_rgb(170, 110, 0),
            selection: egui::Color32::from_rgb(190, 215, 245),
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    /// Color of a log entry
    pub fn for_source(&self, source: LogSource) -> egui::Color32 {
        match source {
            LogSource::Output(level) => self.for_level(level),
            LogSource::Command => self.accent,
            LogSource::Success => self.success,
            LogSource::Failure => self.error,
            LogSource::Notice => self.muted,
        }
    }

    pub fn for_level(&self, level: LogLevel) -> egui::Color32 {
        match level {
            LogLevel::Debug => self.muted,
            LogLevel::Info | LogLevel::Plain => self.foreground,
            LogLevel::Warning => self.warning,
            LogLevel::Error => self.error,
        }
    }
}

impl Default for UiColors {
    fn default() -> Self {
        Self::dark()
    }
}

/// egui visuals for `theme`
pub fn visuals(theme: Theme) -> egui::Visuals {
    let colors = UiColors::for_theme(theme);
    let mut visuals = match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    };
    visuals.selection.bg_fill = colors.selection;
    visuals.hyperlink_color = colors.accent;
    visuals
}
