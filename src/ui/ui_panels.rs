use eframe::egui::{Color32, ComboBox, RichText, Ui};

use crate::analysis::choropleth::{parse_css_color, to_hex_rgb};
use crate::config::{MAP_CONFIG, SUPPORTED_COUNTRIES};
use crate::models::{ConfigPatch, MapConfiguration, select_all_countries};
use crate::ui::config::UI_TEXT;
use crate::ui::utils::{colored_subsection_heading, section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Map configuration controls. Emits one partial patch per user action and
/// never mutates the configuration it was built from.
pub struct ConfigPanel<'a> {
    config: &'a MapConfiguration,
}

impl<'a> ConfigPanel<'a> {
    pub fn new(config: &'a MapConfiguration) -> Self {
        Self { config }
    }

    fn render_outline_picker(&self, ui: &mut Ui) -> Option<String> {
        ui.label(colored_subsection_heading(UI_TEXT.outline_color_label));

        let current = parse_css_color(&self.config.outline_color)
            .or_else(|| parse_css_color(MAP_CONFIG.fallback_outline))
            .unwrap_or(Color32::GREEN);
        let mut rgb = [current.r(), current.g(), current.b()];

        let mut changed = None;
        ui.horizontal(|ui| {
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                changed = Some(to_hex_rgb(Color32::from_rgb(rgb[0], rgb[1], rgb[2])));
            }
            ui.label(RichText::new(&self.config.outline_color).monospace().small());
        });
        changed
    }

    fn render_zoom_selector(&self, ui: &mut Ui) -> Option<String> {
        ui.label(colored_subsection_heading(UI_TEXT.zoom_target_label));

        let current = self.config.zoom_target.as_str();
        let options = std::iter::once(("", UI_TEXT.zoom_target_none))
            .chain(SUPPORTED_COUNTRIES.iter().map(|c| (*c, *c)));

        let mut changed = None;
        ComboBox::from_id_salt("zoom_target")
            .selected_text(self.config.zoom_target().unwrap_or(UI_TEXT.zoom_target_none))
            .show_ui(ui, |ui| {
                for (value, label) in options {
                    if ui.selectable_label(current == value, label).clicked() && current != value {
                        changed = Some(value.to_string());
                    }
                }
            });
        changed
    }

    fn render_country_checkboxes(&self, ui: &mut Ui) -> Option<Vec<String>> {
        let mut changed = None;

        ui.horizontal(|ui| {
            ui.label(colored_subsection_heading(UI_TEXT.selected_countries_label));
            if ui.small_button(UI_TEXT.select_all_button).clicked() {
                changed = Some(select_all_countries());
            }
        });

        for country in SUPPORTED_COUNTRIES {
            let mut checked = self.config.is_selected(country);
            if ui.checkbox(&mut checked, country).changed() {
                changed = Some(self.config.toggled_selection(country));
            }
        }
        changed
    }
}

impl<'a> Panel for ConfigPanel<'a> {
    type Event = ConfigPatch;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.config_heading);

        if let Some(color) = self.render_outline_picker(ui) {
            events.push(ConfigPatch::outline_color(color));
        }
        spaced_separator(ui);

        if let Some(target) = self.render_zoom_selector(ui) {
            events.push(ConfigPatch::zoom_target(target));
        }
        spaced_separator(ui);

        if let Some(countries) = self.render_country_checkboxes(ui) {
            events.push(ConfigPatch::selected_countries(countries));
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions && !events.is_empty() {
            log::info!("Config panel emitted {:?}", events);
        }

        ui.add_space(20.0);
        events
    }
}
