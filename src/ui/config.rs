use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub invalid_value: Color32,
    pub status_ok: Color32,
    /// Import finished but some rows or columns were unusable
    pub status_warning: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(55, 65, 81),
        heading: Color32::from_rgb(17, 24, 39),
        subsection_heading: Color32::from_rgb(75, 85, 99),
        central_panel: Color32::from_rgb(243, 244, 246),
        side_panel: Color32::WHITE,
        invalid_value: Color32::from_rgb(220, 38, 38),
        status_ok: Color32::from_rgb(22, 163, 74),
        status_warning: Color32::from_rgb(180, 120, 0),
    },
    side_panel_min_width: 220.0,
};
