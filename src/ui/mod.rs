// User interface components
pub mod app;
pub mod app_import;
pub mod config;
pub mod map_layers;
pub mod styles;
pub mod ui_grid;
pub mod ui_map_view;
pub mod ui_panels;
pub mod ui_render;
pub mod ui_text;
pub mod utils;

// Re-export main app
pub use app::UserAtlasApp;
pub use config::UI_CONFIG;
