use eframe::egui::{self, Frame};
use egui_plot::{Plot, PlotPoint};
use geo::{Rect, coord};

use crate::analysis::MapPalette;
use crate::analysis::projection::{fit_bounds, viewport_bounds};
use crate::config::MAP_CONFIG;
use crate::data::BoundaryDataset;
use crate::models::AppState;
use crate::ui::map_layers::{
    CountryFillLayer, CountryOutlineLayer, HoverTooltipLayer, LayerContext, MapLayer,
};
use crate::ui::styles::UiStyleExt;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Choropleth world map.
///
/// The plot owns the viewport once shown (pan and zoom are free); this view
/// only pushes new bounds on the first frame and whenever the zoom target
/// changes.
#[derive(Default)]
pub struct MapView {
    /// Zoom target the viewport last reacted to. `None` before the first frame.
    seen_zoom_target: Option<String>,
    pending_bounds: Option<Rect<f64>>,
    /// Palette resolved for a given state revision.
    palette: Option<(u64, MapPalette)>,
}

impl MapView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decides whether the viewport must move this frame.
    ///
    /// The first frame always shows the initial world view. Later target
    /// changes fit the target's extent; clearing the target restores the
    /// initial view; a target with no boundary leaves the viewport alone.
    fn update_viewport(&mut self, dataset: &BoundaryDataset, zoom_target: &str, aspect: f64) {
        let first_frame = self.seen_zoom_target.is_none();
        if self.seen_zoom_target.as_deref() == Some(zoom_target) {
            return;
        }
        self.seen_zoom_target = Some(zoom_target.to_string());

        let initial = viewport_bounds(&MAP_CONFIG.viewport, aspect);
        let bounds = if first_frame || zoom_target.is_empty() {
            Some(initial)
        } else {
            dataset
                .bounds_of(zoom_target)
                .map(|target| fit_bounds(&target, MAP_CONFIG.viewport.fit_padding_pct, aspect))
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_viewport_changes {
            match &bounds {
                Some(b) => log::info!("Viewport -> {:?} (zoom target {:?})", b, zoom_target),
                None => log::info!("No boundary for zoom target {:?}; viewport kept", zoom_target),
            }
        }

        if bounds.is_some() {
            self.pending_bounds = bounds;
        }
    }

    /// Colors only change with the configuration, so parse them once per revision.
    fn palette_for(&mut self, state: &AppState) -> MapPalette {
        match self.palette {
            Some((revision, palette)) if revision == state.revision() => palette,
            _ => {
                let palette = MapPalette::from_config(state.config());
                self.palette = Some((state.revision(), palette));
                palette
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui, dataset: &BoundaryDataset, state: &AppState) {
        let height = MAP_CONFIG.height;
        let aspect = f64::from(height / ui.available_width().max(1.0));
        self.update_viewport(dataset, &state.config().zoom_target, aspect);

        let pending = self.pending_bounds.take();
        let palette = self.palette_for(state);

        Frame::new().fill(MAP_CONFIG.ocean_color).show(ui, |ui| {
            Plot::new("world_map")
                .height(height)
                .data_aspect(1.0)
                .show_axes(false)
                .show_grid(false)
                .show_x(false)
                .show_y(false)
                .show_background(false)
                .label_formatter(|_, _| String::new())
                .allow_boxed_zoom(false)
                .show(ui, |plot_ui| {
                    if let Some(bounds) = pending {
                        plot_ui.set_plot_bounds_x(bounds.min().x..=bounds.max().x);
                        plot_ui.set_plot_bounds_y(bounds.min().y..=bounds.max().y);
                    }

                    // The plot reports a coordinate even when the pointer is elsewhere
                    let hovered = hovered_feature(
                        dataset,
                        plot_ui.pointer_coordinate(),
                        plot_ui.response().hovered(),
                    );

                    let ctx = LayerContext {
                        dataset,
                        config: state.config(),
                        regions: state.regions(),
                        palette,
                        hovered,
                    };

                    // Back to front
                    let layers: Vec<Box<dyn MapLayer>> = vec![
                        Box::new(CountryFillLayer),
                        Box::new(CountryOutlineLayer),
                        Box::new(HoverTooltipLayer),
                    ];

                    for layer in layers {
                        layer.render(plot_ui, &ctx);
                    }
                });
        });

        ui.label_subdued(&dataset.attribution);
    }
}

/// Named feature under the pointer. Unnamed features are drawn but never hover.
fn hovered_feature(
    dataset: &BoundaryDataset,
    pointer: Option<PlotPoint>,
    pointer_over_map: bool,
) -> Option<usize> {
    if !pointer_over_map {
        return None;
    }
    pointer
        .and_then(|p| dataset.feature_at(coord! { x: p.x, y: p.y }))
        .filter(|&i| dataset.features[i].name.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::projection::project;

    fn covers(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
        outer.min().x <= inner.min().x
            && outer.min().y <= inner.min().y
            && outer.max().x >= inner.max().x
            && outer.max().y >= inner.max().y
    }

    fn dataset() -> BoundaryDataset {
        BoundaryDataset::bundled().unwrap()
    }

    #[test]
    fn test_first_frame_shows_world_view() {
        let mut view = MapView::new();
        view.update_viewport(&dataset(), "USA", 0.5);
        let bounds = view.pending_bounds.unwrap();
        assert_eq!(bounds, viewport_bounds(&MAP_CONFIG.viewport, 0.5));
    }

    #[test]
    fn test_target_change_fits_target_once() {
        let data = dataset();
        let mut view = MapView::new();
        view.update_viewport(&data, "USA", 0.5);
        view.pending_bounds = None;

        view.update_viewport(&data, "Japan", 0.5);
        let fitted = view.pending_bounds.take().unwrap();
        let japan = data.bounds_of("Japan").unwrap();
        assert!(covers(&fitted, &japan));

        // Same target again: the user's pan/zoom is left alone
        view.update_viewport(&data, "Japan", 0.5);
        assert!(view.pending_bounds.is_none());
    }

    #[test]
    fn test_clearing_target_restores_initial_view() {
        let data = dataset();
        let mut view = MapView::new();
        view.update_viewport(&data, "France", 0.5);
        view.update_viewport(&data, "Germany", 0.5);
        view.update_viewport(&data, "", 0.5);
        assert_eq!(view.pending_bounds, Some(viewport_bounds(&MAP_CONFIG.viewport, 0.5)));
    }

    #[test]
    fn test_palette_follows_revision() {
        let mut view = MapView::new();
        let mut state = AppState::default();
        let before = view.palette_for(&state);

        state.apply_config_patch(crate::models::ConfigPatch::outline_color("#0000ff"));
        let after = view.palette_for(&state);
        assert_ne!(before.outline, after.outline);
        assert_eq!(after.outline, eframe::egui::Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_unknown_target_keeps_viewport() {
        let data = dataset();
        let mut view = MapView::new();
        view.update_viewport(&data, "", 0.5);
        view.pending_bounds = None;
        view.update_viewport(&data, "Atlantis", 0.5);
        assert!(view.pending_bounds.is_none());
    }

    #[test]
    fn test_hover_needs_pointer_over_map() {
        let data = dataset();
        let berlin = project(13.4, 52.5);
        let pointer = Some(PlotPoint::new(berlin.x, berlin.y));

        let hovered = hovered_feature(&data, pointer, true).unwrap();
        assert_eq!(data.features[hovered].name.as_deref(), Some("Germany"));

        // Same plot coordinate while the pointer is over the grid below the map
        assert_eq!(hovered_feature(&data, pointer, false), None);
        assert_eq!(hovered_feature(&data, None, true), None);
    }
}
