//! Every user-facing string in one place.

pub struct UiText {
    pub app_title: &'static str,
    pub config_heading: &'static str,
    pub outline_color_label: &'static str,
    pub zoom_target_label: &'static str,
    pub zoom_target_none: &'static str,
    pub selected_countries_label: &'static str,
    pub select_all_button: &'static str,
    pub map_heading: &'static str,
    pub grid_heading: &'static str,
    pub import_button: &'static str,
    pub import_busy: &'static str,
    pub import_hover: &'static str,
    pub filter_hint: &'static str,
    pub col_actions: &'static str,
    pub edit_hover: &'static str,
    pub delete_hover: &'static str,
    pub save_hover: &'static str,
    pub cancel_hover: &'static str,
    pub select_all_rows_hover: &'static str,
    pub no_rows: &'static str,
    pub page_label: &'static str,
    pub page_of: &'static str,
    pub metric_selected: &'static str,
    pub metric_zoom: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    app_title: "User Atlas - Users by Region",
    config_heading: "Map Configuration",
    outline_color_label: "Outline Color",
    zoom_target_label: "Zoom to Fit",
    zoom_target_none: "None",
    selected_countries_label: "Selected Countries",
    select_all_button: "Select All",
    map_heading: "World Map",
    grid_heading: "Regions",
    import_button: "📂 Import CSV…",
    import_busy: "Reading file…",
    import_hover: "Replace all rows with a CSV file (State/Province, Country, Total Users)",
    filter_hint: "Filter rows…",
    col_actions: "Actions",
    edit_hover: "Edit this row",
    delete_hover: "Delete this row",
    save_hover: "Done editing",
    cancel_hover: "Stop editing (changes are already applied)",
    select_all_rows_hover: "Select all rows",
    no_rows: "No rows",
    page_label: "Page",
    page_of: "of",
    metric_selected: "Selected",
    metric_zoom: "Zoom",
};
