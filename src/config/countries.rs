//! The fixed set of countries offered by the configuration sidebar.

/// Countries the sidebar can select or zoom to, in display order.
/// "Select All" uses exactly this list.
pub const SUPPORTED_COUNTRIES: [&str; 6] =
    ["USA", "Canada", "United Kingdom", "France", "Germany", "Japan"];
