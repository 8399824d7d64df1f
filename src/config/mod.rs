//! Configuration module for the user atlas application.

mod debug; // Private: use crate::config::DEBUG_FLAGS, not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod countries;
pub mod grid;
pub mod map;

// Re-export commonly used items
pub use countries::SUPPORTED_COUNTRIES;
pub use grid::GRID;
pub use map::MAP_CONFIG;
