// Map projection and choropleth styling
pub mod choropleth;
pub mod projection;

// Re-export commonly used types
pub use choropleth::{FeatureStyle, MapPalette, feature_style, find_region, tooltip_text};
