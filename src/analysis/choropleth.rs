//! Per-country styling and tooltips for the map.

use eframe::egui::{Color32, Stroke};

use crate::config::MAP_CONFIG;
use crate::models::{MapConfiguration, RegionRecord, UserCount, format_grouped};

/// Fill and outline for one boundary feature in the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStyle {
    pub fill: Color32,
    pub stroke: Stroke,
}

/// Colors resolved once per frame from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPalette {
    pub selected_fill: Color32,
    pub neutral_fill: Color32,
    pub hover_fill: Color32,
    pub outline: Color32,
}

impl MapPalette {
    /// Unparseable outline strings fall back to the default outline color.
    pub fn from_config(config: &MapConfiguration) -> Self {
        let fallback = parse_css_color(MAP_CONFIG.fallback_outline).unwrap_or(Color32::GREEN);
        Self {
            selected_fill: fill_color(MAP_CONFIG.selected_fill),
            neutral_fill: fill_color(MAP_CONFIG.neutral_fill),
            hover_fill: fill_color(MAP_CONFIG.hover_fill),
            outline: parse_css_color(&config.outline_color).unwrap_or(fallback),
        }
    }
}

fn fill_color(css: &str) -> Color32 {
    let opaque = parse_css_color(css).unwrap_or(Color32::GRAY);
    let alpha = (MAP_CONFIG.fill_opacity * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(opaque.r(), opaque.g(), opaque.b(), alpha)
}

/// Parses any CSS color (hex in all its lengths, `rgb()`, named colors).
pub fn parse_css_color(css: &str) -> Option<Color32> {
    let color = colorgrad::Color::from_html(css.trim()).ok()?;
    let [r, g, b, a] = color.to_rgba8();
    Some(Color32::from_rgba_unmultiplied(r, g, b, a))
}

/// `#rrggbb`, the form a color input reports.
pub fn to_hex_rgb(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

/// Hover wins over selection; selection decides the outline.
pub fn feature_style(is_selected: bool, is_hovered: bool, palette: &MapPalette) -> FeatureStyle {
    let fill = if is_hovered {
        palette.hover_fill
    } else if is_selected {
        palette.selected_fill
    } else {
        palette.neutral_fill
    };
    let stroke = if is_selected {
        Stroke::new(MAP_CONFIG.selected_stroke_width, palette.outline)
    } else {
        Stroke::new(MAP_CONFIG.default_stroke_width, MAP_CONFIG.default_stroke_color)
    };
    FeatureStyle { fill, stroke }
}

/// First record whose country equals `name` exactly (case-sensitive).
pub fn find_region<'a>(records: &'a [RegionRecord], name: &str) -> Option<&'a RegionRecord> {
    records.iter().find(|r| r.country == name)
}

pub fn tooltip_text(name: &str, record: Option<&RegionRecord>) -> String {
    match record.map(|r| &r.total_users) {
        Some(UserCount::Count(n)) => format!("{}: {} users", name, format_grouped(*n)),
        Some(UserCount::Invalid(_)) => format!("{}: invalid user count", name),
        None => name.to_string(),
    }
}
