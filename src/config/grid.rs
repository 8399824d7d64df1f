//! Data grid configuration

pub struct GridConfig {
    /// Rows shown per page unless overridden with `--page-size`
    pub default_page_size: usize,
    /// Height of a body row in points
    pub row_height: f32,
    /// Width of the inline edit text boxes
    pub edit_field_width: f32,
    /// File dialog filter for imports
    pub import_extensions: &'static [&'static str],
}

pub const GRID: GridConfig = GridConfig {
    default_page_size: 10,
    row_height: 24.0,
    edit_field_width: 140.0,
    import_extensions: &["csv", "txt"],
};
