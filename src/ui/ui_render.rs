use eframe::egui::{CentralPanel, Context, Frame, Margin, RichText, ScrollArea, SidePanel, Ui};

use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_grid::{GridEvent, RegionGridPanel};
use crate::ui::ui_panels::{ConfigPanel, Panel};
use crate::ui::utils::{section_heading, spaced_separator};

use super::app::UserAtlasApp;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl UserAtlasApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(10));
        SidePanel::right("config_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let patches = ConfigPanel::new(self.state.config()).render(ui);
                for patch in patches {
                    self.state.apply_config_patch(patch);
                }

                spaced_separator(ui);
                let config = self.state.config();
                ui.metric(
                    UI_TEXT.metric_selected,
                    &config.selected_countries.len().to_string(),
                    UI_CONFIG.colors.heading,
                );
                ui.metric(
                    UI_TEXT.metric_zoom,
                    config.zoom_target().unwrap_or(UI_TEXT.zoom_target_none),
                    UI_CONFIG.colors.heading,
                );
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(12));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(UI_TEXT.app_title)
                        .size(20.0)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );

                ScrollArea::vertical()
                    .id_salt("central_scroll")
                    .show(ui, |ui| {
                        section_heading(ui, UI_TEXT.map_heading);
                        self.map_view.show(ui, &self.boundaries, &self.state);

                        spaced_separator(ui);

                        let events = self.region_grid_panel(ui);
                        self.handle_grid_events(events);
                    });
            });
    }

    fn region_grid_panel(&mut self, ui: &mut Ui) -> Vec<GridEvent> {
        let status_line = self.import_status_line();
        let busy = self.import_in_progress();
        RegionGridPanel::new(self.state.regions(), &mut self.table, busy, status_line).render(ui)
    }

    fn handle_grid_events(&mut self, events: Vec<GridEvent>) {
        for event in events {
            match event {
                GridEvent::ReplaceRegions(regions) => {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_inline_edits {
                        log::info!("Grid replaced region data ({} rows)", regions.len());
                    }
                    self.state.replace_region_data(regions);
                }
                GridEvent::ImportRequested => self.start_import(),
            }
        }
    }
}
