//! Paginated, sortable region table with inline editing.
//!
//! Edits are committed per keystroke: every change in an edit box produces a
//! full replacement list for the app state. "Save" and "Cancel" only leave
//! edit mode.

use std::hash::Hash;

use eframe::egui::{Align, Button, Color32, Layout, RichText, TextEdit, Ui};
use egui_extras::{Column, TableBuilder};
use strum::IntoEnumIterator;

use crate::config::GRID;
use crate::models::region::{with_field_edit, without_index};
use crate::models::{RegionField, RegionRecord, RegionTableState, SortColumn, UserCount};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::Panel;
use crate::ui::utils::section_heading;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

#[derive(Debug)]
pub enum GridEvent {
    /// New record list after an inline edit or a delete.
    ReplaceRegions(Vec<RegionRecord>),
    ImportRequested,
}

/// Interactions collected while the table is drawn, applied afterwards.
#[derive(Debug)]
enum RowAction {
    ToggleSelected(usize),
    TogglePage,
    Sort(SortColumn),
    BeginEdit(usize),
    EndEdit,
    Delete(usize),
    Edit(usize, RegionField),
}

pub struct RegionGridPanel<'a> {
    records: &'a [RegionRecord],
    table: &'a mut RegionTableState,
    import_busy: bool,
    status_line: Option<(Color32, String)>,
}

impl<'a> RegionGridPanel<'a> {
    pub fn new(
        records: &'a [RegionRecord],
        table: &'a mut RegionTableState,
        import_busy: bool,
        status_line: Option<(Color32, String)>,
    ) -> Self {
        Self {
            records,
            table,
            import_busy,
            status_line,
        }
    }

    fn render_toolbar(&mut self, ui: &mut Ui, events: &mut Vec<GridEvent>) {
        ui.horizontal(|ui| {
            let label = if self.import_busy {
                UI_TEXT.import_busy
            } else {
                UI_TEXT.import_button
            };
            if ui
                .add_enabled(!self.import_busy, Button::new(label))
                .on_hover_text(UI_TEXT.import_hover)
                .clicked()
            {
                events.push(GridEvent::ImportRequested);
            }
            if self.import_busy {
                ui.spinner();
            }

            ui.separator();

            let response = ui.add(
                TextEdit::singleline(&mut self.table.filter)
                    .hint_text(UI_TEXT.filter_hint)
                    .desired_width(180.0),
            );
            if response.changed() {
                self.table.pagination.first();
            }
        });

        if let Some((color, line)) = &self.status_line {
            ui.label(RichText::new(line).small().color(*color));
        }
        ui.add_space(5.0);
    }

    fn render_table(&self, ui: &mut Ui, page: &[usize]) -> Vec<RowAction> {
        let mut actions = Vec::new();
        let editing = self.table.editing();
        let sort = self.table.sort();

        let table = TableBuilder::new(ui)
            .id_salt("region_grid")
            .striped(true)
            .resizable(false)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::exact(28.0))
            .column(Column::auto().at_least(40.0))
            .column(Column::initial(170.0).at_least(100.0))
            .column(Column::initial(150.0).at_least(90.0))
            .column(Column::initial(150.0).at_least(90.0))
            .column(Column::remainder().at_least(80.0));

        table
            .header(GRID.row_height, |mut header| {
                header.col(|ui| {
                    let mut all = self.table.all_selected(page);
                    if ui
                        .checkbox(&mut all, "")
                        .on_hover_text(UI_TEXT.select_all_rows_hover)
                        .changed()
                    {
                        actions.push(RowAction::TogglePage);
                    }
                });
                for column in SortColumn::iter() {
                    header.col(|ui| {
                        let label = match sort {
                            Some(s) if s.column == column => format!("{} {}", column, s.direction),
                            _ => column.to_string(),
                        };
                        if ui
                            .add(Button::new(RichText::new(label).strong()).frame(false))
                            .clicked()
                        {
                            actions.push(RowAction::Sort(column));
                        }
                    });
                }
                header.col(|ui| {
                    ui.strong(UI_TEXT.col_actions);
                });
            })
            .body(|mut body| {
                for &index in page {
                    let record = &self.records[index];
                    let is_editing = editing == Some(index);

                    body.row(GRID.row_height, |mut row| {
                        row.col(|ui| {
                            let mut selected = self.table.is_selected(index);
                            if ui.checkbox(&mut selected, "").changed() {
                                actions.push(RowAction::ToggleSelected(index));
                            }
                        });
                        row.col(|ui| {
                            ui.label(record.id.to_string());
                        });
                        row.col(|ui| {
                            if is_editing {
                                if let Some(text) =
                                    edit_cell(ui, ("state_province", index), &record.state_province)
                                {
                                    actions.push(RowAction::Edit(
                                        index,
                                        RegionField::StateProvince(text),
                                    ));
                                }
                            } else {
                                ui.label(&record.state_province);
                            }
                        });
                        row.col(|ui| {
                            if is_editing {
                                if let Some(text) = edit_cell(ui, ("country", index), &record.country) {
                                    actions.push(RowAction::Edit(index, RegionField::Country(text)));
                                }
                            } else {
                                ui.label(&record.country);
                            }
                        });
                        row.col(|ui| {
                            if is_editing {
                                let current = record.total_users.edit_text();
                                if let Some(text) = edit_cell(ui, ("total_users", index), &current) {
                                    actions.push(RowAction::Edit(
                                        index,
                                        RegionField::TotalUsers(UserCount::parse(&text)),
                                    ));
                                }
                            } else {
                                user_count_label(ui, &record.total_users);
                            }
                        });
                        row.col(|ui| {
                            if is_editing {
                                if ui.small_button("✔").on_hover_text(UI_TEXT.save_hover).clicked() {
                                    actions.push(RowAction::EndEdit);
                                }
                                if ui.small_button("❌").on_hover_text(UI_TEXT.cancel_hover).clicked() {
                                    actions.push(RowAction::EndEdit);
                                }
                            } else {
                                if ui.small_button("✏").on_hover_text(UI_TEXT.edit_hover).clicked() {
                                    actions.push(RowAction::BeginEdit(index));
                                }
                                if ui.small_button("🗑").on_hover_text(UI_TEXT.delete_hover).clicked() {
                                    actions.push(RowAction::Delete(index));
                                }
                            }
                        });
                    });
                }
            });

        if page.is_empty() {
            ui.label_subdued(UI_TEXT.no_rows);
        }
        actions
    }

    fn render_pagination(&mut self, ui: &mut Ui, row_count: usize) {
        let selected = self.table.selected_count();
        let pagination = &mut self.table.pagination;

        ui.horizontal(|ui| {
            if ui.add_enabled(pagination.can_previous(), Button::new("«")).clicked() {
                pagination.first();
            }
            if ui.add_enabled(pagination.can_previous(), Button::new("‹")).clicked() {
                pagination.previous();
            }
            if ui.add_enabled(pagination.can_next(row_count), Button::new("›")).clicked() {
                pagination.next(row_count);
            }
            if ui.add_enabled(pagination.can_next(row_count), Button::new("»")).clicked() {
                pagination.last(row_count);
            }

            ui.label(format!(
                "{} {} {} {}",
                UI_TEXT.page_label,
                pagination.page_index() + 1,
                UI_TEXT.page_of,
                pagination.page_count(row_count).max(1)
            ));
            ui.separator();
            ui.label_subdued(format!("{} rows, {} selected", row_count, selected));
        });
    }
}

/// Applies the interactions of one frame. Edits and deletes become full
/// replacement lists built from `records`.
fn apply_row_actions(
    records: &[RegionRecord],
    table: &mut RegionTableState,
    actions: Vec<RowAction>,
    page: &[usize],
) -> Vec<GridEvent> {
    let mut events = Vec::new();
    for action in actions {
        #[cfg(debug_assertions)]
        {
            let keystroke = matches!(action, RowAction::Edit(..));
            if (keystroke && DEBUG_FLAGS.print_inline_edits)
                || (!keystroke && DEBUG_FLAGS.print_ui_interactions)
            {
                log::info!("Grid action: {:?}", action);
            }
        }

        match action {
            RowAction::ToggleSelected(index) => table.toggle_selected(index),
            RowAction::TogglePage => table.toggle_all(page),
            RowAction::Sort(column) => table.cycle_sort(column),
            RowAction::BeginEdit(index) => table.begin_edit(index),
            RowAction::EndEdit => table.end_edit(),
            RowAction::Delete(index) => {
                events.push(GridEvent::ReplaceRegions(without_index(records, index)));
                table.on_row_deleted(index);
            }
            RowAction::Edit(index, field) => {
                events.push(GridEvent::ReplaceRegions(with_field_edit(records, index, field)));
            }
        }
    }
    events
}

impl<'a> Panel for RegionGridPanel<'a> {
    type Event = GridEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        self.table.sync_len(self.records.len());

        section_heading(ui, UI_TEXT.grid_heading);
        self.render_toolbar(ui, &mut events);

        let rows = self.table.visible_rows(self.records);
        self.table.pagination.clamp(rows.len());
        let page = rows[self.table.pagination.page_range(rows.len())].to_vec();

        let actions = self.render_table(ui, &page);
        ui.add_space(5.0);
        self.render_pagination(ui, rows.len());

        events.extend(apply_row_actions(self.records, self.table, actions, &page));
        events
    }
}

/// Single-line edit box; returns the new text when it changed this frame.
fn edit_cell(ui: &mut Ui, id: impl Hash, value: &str) -> Option<String> {
    let mut text = value.to_string();
    let response = ui.add(
        TextEdit::singleline(&mut text)
            .id_salt(id)
            .desired_width(GRID.edit_field_width),
    );
    response.changed().then_some(text)
}

fn user_count_label(ui: &mut Ui, count: &UserCount) {
    match count {
        UserCount::Count(_) => {
            ui.label(count.to_string());
        }
        UserCount::Invalid(raw) => {
            ui.label(RichText::new("NaN").color(UI_CONFIG.colors.invalid_value))
                .on_hover_text(format!("Not a number: {:?}", raw));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::initial_regions;
    use crate::models::AppState;

    fn replaced(events: Vec<GridEvent>) -> Vec<Vec<RegionRecord>> {
        events
            .into_iter()
            .filter_map(|e| match e {
                GridEvent::ReplaceRegions(list) => Some(list),
                GridEvent::ImportRequested => None,
            })
            .collect()
    }

    #[test]
    fn test_inline_edit_is_live_and_cancel_keeps_it() {
        let mut state = AppState::default();
        state.replace_region_data(initial_regions());
        let mut table = RegionTableState::new(10);
        let page = table.page_rows(state.regions());

        let events = apply_row_actions(state.regions(), &mut table, vec![RowAction::BeginEdit(1)], &page);
        assert!(events.is_empty());
        assert_eq!(table.editing(), Some(1));

        // One keystroke: the list changes before anything is saved
        let keystroke = RowAction::Edit(1, RegionField::TotalUsers(UserCount::parse("123")));
        let mut lists = replaced(apply_row_actions(state.regions(), &mut table, vec![keystroke], &page));
        assert_eq!(lists.len(), 1);
        state.replace_region_data(lists.remove(0));
        assert_eq!(state.regions()[1].total_users, UserCount::Count(123));
        assert_eq!(table.editing(), Some(1));

        // Cancel only leaves edit mode
        let events = apply_row_actions(state.regions(), &mut table, vec![RowAction::EndEdit], &page);
        assert!(events.is_empty());
        assert_eq!(table.editing(), None);
        assert_eq!(state.regions()[1].total_users, UserCount::Count(123));
        assert_eq!(state.regions()[0], initial_regions()[0]);
    }

    #[test]
    fn test_delete_replaces_list_and_shifts_table_state() {
        let records = initial_regions();
        let mut table = RegionTableState::new(10);
        table.begin_edit(2);
        table.toggle_selected(3);
        let page = table.page_rows(&records);

        let lists = replaced(apply_row_actions(&records, &mut table, vec![RowAction::Delete(0)], &page));

        assert_eq!(lists, vec![records[1..].to_vec()]);
        assert_eq!(table.editing(), Some(1));
        assert!(table.is_selected(2));
        assert_eq!(table.selected_count(), 1);
    }

    #[test]
    fn test_header_checkbox_and_sort_touch_only_view_state() {
        let records = initial_regions();
        let mut table = RegionTableState::new(2);
        let page = table.page_rows(&records);

        let events = apply_row_actions(
            &records,
            &mut table,
            vec![RowAction::TogglePage, RowAction::Sort(SortColumn::Country)],
            &page,
        );

        assert!(events.is_empty());
        assert!(table.all_selected(&page));
        assert_eq!(table.selected_count(), 2);
        assert!(table.sort().is_some());
    }
}
