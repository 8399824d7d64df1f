//! The single source of truth for a session.
//!
//! Views never mutate this directly: they return events, and the app turns
//! those into one of the two update calls below.

use crate::models::map_config::{ConfigPatch, MapConfiguration};
use crate::models::region::RegionRecord;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    config: MapConfiguration,
    regions: Vec<RegionRecord>,
    /// Bumped by every update so views can drop derived caches.
    revision: u64,
}

impl AppState {
    pub fn new(config: MapConfiguration, regions: Vec<RegionRecord>) -> Self {
        Self {
            config,
            regions,
            revision: 0,
        }
    }

    pub fn config(&self) -> &MapConfiguration {
        &self.config
    }

    pub fn regions(&self) -> &[RegionRecord] {
        &self.regions
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Shallow-merges `patch` into the current configuration.
    pub fn apply_config_patch(&mut self, patch: ConfigPatch) -> &MapConfiguration {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Config patch: {:?}", patch);
        }

        self.config = self.config.merged(&patch);
        self.revision += 1;
        &self.config
    }

    /// Replaces the whole record list. No merge, no diffing.
    pub fn replace_region_data(&mut self, regions: Vec<RegionRecord>) {
        self.regions = regions;
        self.revision += 1;
    }
}
