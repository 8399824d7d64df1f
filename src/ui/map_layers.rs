use eframe::egui::{Id, LayerId, Order::Tooltip, RichText, Stroke, Ui};

#[allow(deprecated)]
use eframe::egui::show_tooltip_at_pointer;

use egui_plot::{Line, PlotPoints, PlotUi, Polygon};

use crate::analysis::choropleth::{FeatureStyle, MapPalette, feature_style, find_region, tooltip_text};
use crate::data::{BoundaryDataset, BoundaryFeature};
use crate::models::{MapConfiguration, RegionRecord};

/// Context passed to every layer during rendering.
pub struct LayerContext<'a> {
    pub dataset: &'a BoundaryDataset,
    pub config: &'a MapConfiguration,
    pub regions: &'a [RegionRecord],
    pub palette: MapPalette,
    /// Feature under the pointer, if any.
    pub hovered: Option<usize>,
}

impl<'a> LayerContext<'a> {
    fn is_selected(&self, feature: &BoundaryFeature) -> bool {
        feature
            .name
            .as_deref()
            .is_some_and(|name| self.config.is_selected(name))
    }

    fn style_of(&self, index: usize, feature: &BoundaryFeature) -> FeatureStyle {
        feature_style(
            self.is_selected(feature),
            self.hovered == Some(index),
            &self.palette,
        )
    }
}

/// A standardized layer in the map stack.
pub trait MapLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

fn feature_label(feature: &BoundaryFeature) -> &str {
    feature.name.as_deref().unwrap_or("")
}

// ============================================================================
// 1. FILL LAYER
// ============================================================================
pub struct CountryFillLayer;

impl MapLayer for CountryFillLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for (index, feature) in ctx.dataset.features.iter().enumerate() {
            let style = ctx.style_of(index, feature);
            for triangle in &feature.triangles {
                let corners = triangle.to_array().map(|c| [c.x, c.y]).to_vec();
                let polygon = Polygon::new(feature_label(feature), PlotPoints::new(corners))
                    .fill_color(style.fill)
                    .stroke(Stroke::NONE);
                plot_ui.polygon(polygon);
            }
        }
    }
}

// ============================================================================
// 2. OUTLINE LAYER
// ============================================================================
pub struct CountryOutlineLayer;

impl CountryOutlineLayer {
    fn draw_outline(plot_ui: &mut PlotUi, feature: &BoundaryFeature, stroke: Stroke) {
        let rings = feature
            .shape
            .iter()
            .flat_map(|polygon| std::iter::once(polygon.exterior()).chain(polygon.interiors()));
        // Rings are already closed
        for ring in rings {
            let points: Vec<[f64; 2]> = ring.coords().map(|c| [c.x, c.y]).collect();
            let line = Line::new(feature_label(feature), PlotPoints::new(points))
                .color(stroke.color)
                .width(stroke.width);
            plot_ui.line(line);
        }
    }
}

impl MapLayer for CountryOutlineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        // Selected outlines go last so neighbouring white borders never cover them
        let (selected, plain): (Vec<_>, Vec<_>) = ctx
            .dataset
            .features
            .iter()
            .enumerate()
            .partition(|(_, f)| ctx.is_selected(f));

        for (index, feature) in plain.into_iter().chain(selected) {
            let style = ctx.style_of(index, feature);
            Self::draw_outline(plot_ui, feature, style.stroke);
        }
    }
}

// ============================================================================
// 3. TOOLTIP LAYER
// ============================================================================
pub struct HoverTooltipLayer;

impl MapLayer for HoverTooltipLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let Some(feature) = ctx.hovered.and_then(|i| ctx.dataset.features.get(i)) else {
            return;
        };
        let Some(name) = feature.name.as_deref() else {
            return;
        };

        let text = tooltip_text(name, find_region(ctx.regions, name));
        let tooltip_layer = LayerId::new(Tooltip, Id::new("country_tooltips"));

        #[allow(deprecated)]
        show_tooltip_at_pointer(
            plot_ui.ctx(),
            tooltip_layer,
            Id::new("country_tooltip"),
            |ui: &mut Ui| {
                ui.label(RichText::new(text).strong());
            },
        );
    }
}
