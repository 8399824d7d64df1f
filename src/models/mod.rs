// Domain models for the atlas
// Pure state and update rules, independent of UI/visualization

pub mod app_state;
pub mod map_config;
pub mod region;
pub mod region_table;

// Re-export key types for convenience
pub use app_state::AppState;
pub use map_config::{ConfigPatch, MapConfiguration, select_all_countries};
pub use region::{RegionField, RegionRecord, UserCount, format_grouped};
pub use region_table::{Pagination, RegionTableState, SortColumn, SortDirection, SortState};
