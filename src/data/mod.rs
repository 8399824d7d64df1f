// Data loading: boundary dataset, CSV import and startup data
pub mod boundaries;
pub mod csv_import;
pub mod seed;
pub mod startup;

// Re-export commonly used types
pub use boundaries::{BoundaryDataset, BoundaryError, BoundaryFeature};
pub use csv_import::{ImportError, ImportReport, ImportedFile, parse_region_csv};
#[cfg(not(target_arch = "wasm32"))]
pub use csv_import::read_region_csv;
pub use seed::initial_regions;
pub use startup::{StartupData, StartupImport};
