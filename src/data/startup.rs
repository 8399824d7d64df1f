//! Everything the app needs before the first frame.
//!
//! Startup never fails because of user-supplied files: a bad boundary file
//! falls back to the bundled outlines and a bad import keeps the seed data.

use std::time::Duration;

use crate::data::{BoundaryDataset, ImportReport, initial_regions};

#[cfg(not(target_arch = "wasm32"))]
use anyhow::Context;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

/// A file imported from the command line, applied once the app exists.
#[derive(Debug, Clone)]
pub struct StartupImport {
    pub source: String,
    pub report: ImportReport,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct StartupData {
    pub boundaries: BoundaryDataset,
    pub regions: Vec<crate::models::RegionRecord>,
    pub startup_import: Option<StartupImport>,
    pub page_size: usize,
}

impl StartupData {
    /// Bundled outlines and the seed records.
    pub fn bundled(page_size: usize) -> Self {
        Self {
            boundaries: bundled_boundaries(),
            regions: initial_regions(),
            startup_import: None,
            page_size,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(boundaries: Option<&Path>, import: Option<&Path>, page_size: usize) -> Self {
        let mut data = Self::bundled(page_size);

        if let Some(path) = boundaries {
            match load_boundaries(path) {
                Ok(dataset) => data.boundaries = dataset,
                Err(e) => log::error!("{:#}; using bundled boundaries", e),
            }
        }

        if let Some(path) = import {
            match load_import(path) {
                Ok(startup_import) => data.startup_import = Some(startup_import),
                Err(e) => log::error!("{:#}; keeping the initial records", e),
            }
        }

        data
    }
}

fn bundled_boundaries() -> BoundaryDataset {
    BoundaryDataset::bundled().unwrap_or_else(|e| {
        log::error!("Bundled boundaries are unreadable: {}", e);
        BoundaryDataset::default()
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn load_boundaries(path: &Path) -> anyhow::Result<BoundaryDataset> {
    let dataset = BoundaryDataset::load(path)
        .with_context(|| format!("Failed to load boundaries from {}", path.display()))?;
    anyhow::ensure!(
        !dataset.features.is_empty(),
        "{} has no Polygon or MultiPolygon features",
        path.display()
    );
    log::info!(
        "Loaded {} boundary features from {}",
        dataset.features.len(),
        path.display()
    );
    Ok(dataset)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_import(path: &Path) -> anyhow::Result<StartupImport> {
    let started = web_time::Instant::now();
    let report = crate::data::read_region_csv(path)
        .with_context(|| format!("Failed to import {}", path.display()))?;
    Ok(StartupImport {
        source: path.display().to_string(),
        report,
        elapsed: started.elapsed(),
    })
}
