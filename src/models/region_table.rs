//! View state of the region grid: paging, sorting, filtering, row selection
//! and the inline edit session.
//!
//! Everything here indexes into the underlying record list; sorting and
//! filtering only change which indices are shown and in what order.

use std::collections::BTreeSet;
use std::ops::Range;

use strum_macros::{Display, EnumIter};

use crate::models::region::{RegionRecord, UserCount, format_grouped};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum SortColumn {
    #[strum(to_string = "ID")]
    Id,
    #[strum(to_string = "State/Province")]
    StateProvince,
    #[strum(to_string = "Country")]
    Country,
    #[strum(to_string = "Total Users")]
    TotalUsers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SortDirection {
    #[strum(to_string = "⏶")]
    Ascending,
    #[strum(to_string = "⏷")]
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_index: usize,
    page_size: usize,
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, row_count: usize) -> bool {
        self.page_index + 1 < self.page_count(row_count)
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn next(&mut self, row_count: usize) {
        if self.can_next(row_count) {
            self.page_index += 1;
        }
    }

    pub fn last(&mut self, row_count: usize) {
        self.page_index = self.page_count(row_count).saturating_sub(1);
    }

    /// Pulls the page index back inside range after rows disappeared.
    pub fn clamp(&mut self, row_count: usize) {
        let last = self.page_count(row_count).saturating_sub(1);
        self.page_index = self.page_index.min(last);
    }

    /// Positions (into the visible row list) shown on the current page.
    pub fn page_range(&self, row_count: usize) -> Range<usize> {
        let start = (self.page_index * self.page_size).min(row_count);
        let end = (start + self.page_size).min(row_count);
        start..end
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(crate::config::GRID.default_page_size)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegionTableState {
    pub pagination: Pagination,
    pub filter: String,
    sort: Option<SortState>,
    selected: BTreeSet<usize>,
    editing: Option<usize>,
}

impl RegionTableState {
    pub fn new(page_size: usize) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            ..Default::default()
        }
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    /// Ascending, then descending, then unsorted. A new column starts ascending.
    pub fn cycle_sort(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some(SortState {
                column: current,
                direction: SortDirection::Ascending,
            }) if current == column => Some(SortState {
                column,
                direction: SortDirection::Descending,
            }),
            Some(SortState {
                column: current,
                direction: SortDirection::Descending,
            }) if current == column => None,
            _ => Some(SortState {
                column,
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// Underlying indices passing the filter, in sort order (all pages).
    pub fn visible_rows(&self, records: &[RegionRecord]) -> Vec<usize> {
        let needle = self.filter.trim().to_lowercase();
        let mut rows: Vec<usize> = records
            .iter()
            .enumerate()
            .filter(|(_, r)| needle.is_empty() || matches_filter(r, &needle))
            .map(|(i, _)| i)
            .collect();

        if let Some(sort) = self.sort {
            // Stable sort keeps list order among equal keys
            rows.sort_by(|&a, &b| {
                let (ra, rb) = (&records[a], &records[b]);
                let ord = match sort.column {
                    SortColumn::Id => ra.id.cmp(&rb.id),
                    SortColumn::StateProvince => ra.state_province.cmp(&rb.state_province),
                    SortColumn::Country => ra.country.cmp(&rb.country),
                    SortColumn::TotalUsers => ra.total_users.cmp(&rb.total_users),
                };
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        rows
    }

    /// Underlying indices on the current page.
    pub fn page_rows(&self, records: &[RegionRecord]) -> Vec<usize> {
        let rows = self.visible_rows(records);
        let range = self.pagination.page_range(rows.len());
        rows[range].to_vec()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    pub fn toggle_selected(&mut self, index: usize) {
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn all_selected(&self, rows: &[usize]) -> bool {
        !rows.is_empty() && rows.iter().all(|i| self.selected.contains(i))
    }

    /// Selects every row in `rows`, or deselects them if all were selected.
    /// Rows outside `rows` keep their selection.
    pub fn toggle_all(&mut self, rows: &[usize]) {
        if self.all_selected(rows) {
            for row in rows {
                self.selected.remove(row);
            }
        } else {
            self.selected.extend(rows.iter().copied());
        }
    }

    pub fn editing(&self) -> Option<usize> {
        self.editing
    }

    pub fn begin_edit(&mut self, index: usize) {
        self.editing = Some(index);
    }

    /// Both "save" and "cancel" land here: values were already committed per keystroke.
    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    /// Shifts indices above `index` down by one after that record was removed.
    pub fn on_row_deleted(&mut self, index: usize) {
        self.editing = match self.editing {
            Some(e) if e == index => None,
            Some(e) if e > index => Some(e - 1),
            other => other,
        };
        self.selected = self
            .selected
            .iter()
            .filter(|&&i| i != index)
            .map(|&i| if i > index { i - 1 } else { i })
            .collect();
    }

    /// Called after an import replaced the list: indices no longer refer to the same rows.
    pub fn on_data_imported(&mut self) {
        self.editing = None;
        self.selected.clear();
        self.pagination.first();
    }

    /// Keeps state consistent with a list of `len` records.
    pub fn sync_len(&mut self, len: usize) {
        if self.editing.is_some_and(|e| e >= len) {
            self.editing = None;
        }
        self.selected.retain(|&i| i < len);
    }
}

fn matches_filter(record: &RegionRecord, needle: &str) -> bool {
    record.state_province.to_lowercase().contains(needle)
        || record.country.to_lowercase().contains(needle)
        || record.id.to_string().contains(needle)
        || match &record.total_users {
            // Raw digits or the grouped form the grid shows
            UserCount::Count(n) => n.to_string().contains(needle) || format_grouped(*n).contains(needle),
            UserCount::Invalid(raw) => raw.to_lowercase().contains(needle),
        }
}
