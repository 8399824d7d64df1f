#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use data::{BoundaryDataset, ImportReport, StartupData, parse_region_csv};
pub use models::{AppState, ConfigPatch, MapConfiguration, RegionRecord, UserCount};
pub use ui::UserAtlasApp;

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// GeoJSON FeatureCollection of country boundaries (features joined on `properties.name`)
    #[arg(long, value_name = "PATH")]
    pub boundaries: Option<PathBuf>,

    /// CSV with State/Province, Country and Total Users columns to load instead of the sample rows
    #[arg(long, value_name = "PATH")]
    pub import: Option<PathBuf>,

    /// Rows per grid page
    #[arg(
        long,
        default_value_t = config::GRID.default_page_size,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub page_size: usize,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext, startup: StartupData) -> Box<dyn eframe::App> {
    Box::new(UserAtlasApp::new(cc, startup))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["user-atlas"]).unwrap();
        assert!(cli.boundaries.is_none());
        assert!(cli.import.is_none());
        assert_eq!(cli.page_size, 10);
    }

    #[test]
    fn test_cli_rejects_zero_page_size() {
        assert!(Cli::try_parse_from(["user-atlas", "--page-size", "0"]).is_err());
        let cli = Cli::try_parse_from(["user-atlas", "--page-size", "25", "--import", "r.csv"]).unwrap();
        assert_eq!(cli.page_size, 25);
        assert_eq!(cli.import, Some(PathBuf::from("r.csv")));
    }
}
