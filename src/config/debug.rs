//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` so that
//! debug builds stay readable. Every flag is additionally gated by
//! `cfg(debug_assertions)` at the call site.

pub struct DebugFlags {
    /// Emit UI interaction logs (config patches, edit mode changes, deletes).
    pub print_ui_interactions: bool,
    /// Emit one line per keystroke committed through inline editing.
    pub print_inline_edits: bool,
    /// Emit per-line details while parsing an import file.
    pub print_import_lines: bool,
    /// Emit viewport changes (zoom-to-fit, reset).
    pub print_viewport_changes: bool,
    /// Emit boundary dataset statistics after loading.
    pub print_boundary_stats: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_inline_edits: false,
    print_import_lines: false,
    print_viewport_changes: true,
    print_boundary_stats: true,
    print_shutdown: false,
};
