//! Map visualization configuration

use eframe::egui::Color32;

pub struct ViewportConfig {
    /// Initial map center (degrees)
    pub center_lat: f64,
    pub center_lon: f64,
    /// Initial zoom level. Level 2 fits the whole world into the map width.
    pub zoom: f64,
    /// Fraction of the target extent added on every side when zooming to fit
    pub fit_padding_pct: f64,
}

pub struct MapConfig {
    /// Fill for countries in the selection
    pub selected_fill: &'static str,
    /// Fill for every other country
    pub neutral_fill: &'static str,
    /// Fill while the pointer is over a country, regardless of selection
    pub hover_fill: &'static str,
    /// Outline used when the configured outline color cannot be parsed
    pub fallback_outline: &'static str,
    pub fill_opacity: f32,
    pub default_stroke_color: Color32,
    pub default_stroke_width: f32,
    pub selected_stroke_width: f32,
    /// Color behind the country shapes
    pub ocean_color: Color32,
    /// Height of the map widget in points
    pub height: f32,
    pub viewport: ViewportConfig,
}

pub const MAP_CONFIG: MapConfig = MapConfig {
    selected_fill: "#F4C430", // Saffron
    neutral_fill: "#D6D6DA",  // Light gray
    hover_fill: "#F53",
    fallback_outline: "#00ff00",
    fill_opacity: 0.7,
    default_stroke_color: Color32::WHITE,
    default_stroke_width: 1.0,
    selected_stroke_width: 2.0,
    ocean_color: Color32::from_rgb(170, 211, 223),
    height: 400.0,
    viewport: ViewportConfig {
        center_lat: 20.0,
        center_lon: 0.0,
        zoom: 2.0,
        fit_padding_pct: 0.1,
    },
};
