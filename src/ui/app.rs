use eframe::{Frame, egui};
use poll_promise::Promise;

use crate::data::{BoundaryDataset, ImportError, ImportedFile, StartupData};
use crate::models::{AppState, MapConfiguration, RegionRecord, RegionTableState};
use crate::ui::app_import::ImportStatus;
use crate::ui::ui_map_view::MapView;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Outcome of the file picker plus read. `None` means the user cancelled.
pub(super) type PickedFile = Option<Result<ImportedFile, ImportError>>;

pub struct UserAtlasApp {
    pub(super) state: AppState,
    pub(super) boundaries: BoundaryDataset,
    pub(super) table: RegionTableState,
    pub(super) map_view: MapView,
    pub(super) import_promise: Option<Promise<PickedFile>>,
    pub(super) import_status: Option<ImportStatus>,
}

impl UserAtlasApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, startup: StartupData) -> Self {
        let StartupData {
            boundaries,
            regions,
            startup_import,
            page_size,
        } = startup;

        let mut app = Self::with_state(boundaries, regions, page_size);
        if let Some(import) = startup_import {
            app.apply_import_report(&import.source, import.report, import.elapsed);
        }
        app
    }

    /// Everything `new` does that doesn't need a window.
    pub fn with_state(boundaries: BoundaryDataset, regions: Vec<RegionRecord>, page_size: usize) -> Self {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_boundary_stats {
            log::info!(
                "Boundary dataset: {} features, {} fill triangles",
                boundaries.features.len(),
                boundaries.triangle_count()
            );
        }

        log::info!("Starting with {} region records", regions.len());

        Self {
            state: AppState::new(MapConfiguration::default(), regions),
            boundaries,
            table: RegionTableState::new(page_size),
            map_view: MapView::new(),
            import_promise: None,
            import_status: None,
        }
    }
}

impl eframe::App for UserAtlasApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // A pending file dialog must not outlive the app
        self.import_promise = None;

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_import(ctx);

        self.render_side_panel(ctx);
        self.render_central_panel(ctx);
    }
}
