use std::time::Duration;

use eframe::egui::{self, Color32};
use poll_promise::Promise;

use crate::config::GRID;
use crate::data::{ImportError, ImportReport, parse_region_csv};
use crate::ui::app::UserAtlasApp;
use crate::ui::config::UI_CONFIG;
use crate::ui::utils::format_duration_short;

#[cfg(not(target_arch = "wasm32"))]
use crate::data::ImportedFile;

/// What the last import did, for the grid's status line.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportStatus {
    Imported {
        source: String,
        records: usize,
        invalid_counts: usize,
        missing_headers: Vec<&'static str>,
        elapsed: Duration,
    },
    Failed(String),
}

impl ImportStatus {
    pub fn line(&self) -> (Color32, String) {
        match self {
            ImportStatus::Imported {
                source,
                records,
                invalid_counts,
                missing_headers,
                elapsed,
            } => {
                let mut line = format!(
                    "Imported {} rows from {} in {}",
                    records,
                    source,
                    format_duration_short(*elapsed)
                );
                if *invalid_counts > 0 {
                    line.push_str(&format!(", {} with an invalid user count", invalid_counts));
                }
                if !missing_headers.is_empty() {
                    line.push_str(&format!(", missing column: {}", missing_headers.join(", ")));
                }
                let color = if *invalid_counts == 0 && missing_headers.is_empty() {
                    UI_CONFIG.colors.status_ok
                } else {
                    UI_CONFIG.colors.status_warning
                };
                (color, line)
            }
            ImportStatus::Failed(msg) => {
                (UI_CONFIG.colors.invalid_value, format!("Import failed: {}", msg))
            }
        }
    }
}

impl UserAtlasApp {
    pub fn import_in_progress(&self) -> bool {
        self.import_promise.is_some()
    }

    pub(super) fn import_status_line(&self) -> Option<(Color32, String)> {
        self.import_status.as_ref().map(ImportStatus::line)
    }

    /// Opens the file picker and starts reading the chosen file in the background.
    pub(super) fn start_import(&mut self) {
        if self.import_promise.is_some() {
            return;
        }

        // The native dialog is modal; only the read runs off the UI thread
        #[cfg(not(target_arch = "wasm32"))]
        let promise = {
            let Some(path) = rfd::FileDialog::new()
                .add_filter("CSV", GRID.import_extensions)
                .pick_file()
            else {
                log::info!("Import cancelled");
                return;
            };
            Promise::spawn_thread("csv_import", move || Some(ImportedFile::read(&path)))
        };

        #[cfg(target_arch = "wasm32")]
        let promise = Promise::spawn_local(async move {
            let file = rfd::AsyncFileDialog::new()
                .add_filter("CSV", GRID.import_extensions)
                .pick_file()
                .await?;
            Some(Ok(crate::data::ImportedFile {
                name: file.file_name(),
                bytes: file.read().await,
            }))
        });

        self.import_promise = Some(promise);
    }

    pub(super) fn poll_import(&mut self, ctx: &egui::Context) {
        let Some(promise) = self.import_promise.take() else {
            return;
        };
        let picked = match promise.try_take() {
            Ok(picked) => picked,
            Err(pending) => {
                self.import_promise = Some(pending);
                ctx.request_repaint_after(Duration::from_millis(100));
                return;
            }
        };

        match picked {
            None => log::info!("Import cancelled"),
            Some(Err(e)) => self.fail_import(e),
            Some(Ok(file)) => {
                let source = file.name.clone();
                match file.text() {
                    Ok(text) => {
                        let started = web_time::Instant::now();
                        let report = parse_region_csv(&text);
                        self.apply_import_report(&source, report, started.elapsed());
                    }
                    Err(e) => self.fail_import(e),
                }
            }
        }
    }

    /// Replaces every record with the imported ones. Also used for `--import` at startup.
    pub fn apply_import_report(&mut self, source: &str, report: ImportReport, elapsed: Duration) {
        let ImportReport {
            records,
            invalid_counts,
            missing_headers,
        } = report;

        if !missing_headers.is_empty() {
            log::warn!("{}: missing column(s) {}", source, missing_headers.join(", "));
        }
        if invalid_counts > 0 {
            log::warn!("{}: {} row(s) with a non-numeric Total Users", source, invalid_counts);
        }
        log::info!("Imported {} rows from {} in {:?}", records.len(), source, elapsed);

        self.import_status = Some(ImportStatus::Imported {
            source: source.to_string(),
            records: records.len(),
            invalid_counts,
            missing_headers,
            elapsed,
        });
        self.state.replace_region_data(records);
        self.table.on_data_imported();
    }

    fn fail_import(&mut self, error: ImportError) {
        log::error!("Import failed: {}", error);
        self.import_status = Some(ImportStatus::Failed(error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BoundaryDataset, ImportedFile, initial_regions};
    use crate::models::UserCount;

    fn app() -> UserAtlasApp {
        UserAtlasApp::with_state(BoundaryDataset::default(), initial_regions(), 10)
    }

    fn ready(file: ImportedFile) -> Option<Promise<crate::ui::app::PickedFile>> {
        Some(Promise::from_ready(Some(Ok(file))))
    }

    #[test]
    fn test_completed_import_replaces_records() {
        let mut app = app();
        app.table.begin_edit(0);
        app.import_promise = ready(ImportedFile {
            name: "regions.csv".into(),
            bytes: b"Country,State/Province,Total Users\nJapan,Osaka,7\nFrance,Brittany,x".to_vec(),
        });

        app.poll_import(&egui::Context::default());

        let regions = app.state.regions();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].state_province, "Osaka");
        assert_eq!(regions[1].total_users, UserCount::Invalid("x".into()));
        assert!(app.table.editing().is_none());
        assert!(!app.import_in_progress());

        let (_, line) = app.import_status_line().unwrap();
        assert!(line.starts_with("Imported 2 rows from regions.csv"));
        assert!(line.contains("1 with an invalid user count"));
    }

    #[test]
    fn test_non_utf8_file_keeps_records() {
        let mut app = app();
        let before = app.state.regions().to_vec();
        app.import_promise = ready(ImportedFile {
            name: "binary.csv".into(),
            bytes: vec![0xff, 0xfe],
        });

        app.poll_import(&egui::Context::default());

        assert_eq!(app.state.regions(), before.as_slice());
        assert!(matches!(app.import_status, Some(ImportStatus::Failed(_))));
    }

    #[test]
    fn test_cancelled_pick_changes_nothing() {
        let mut app = app();
        let revision = app.state.revision();
        app.import_promise = Some(Promise::from_ready(None));

        app.poll_import(&egui::Context::default());

        assert_eq!(app.state.revision(), revision);
        assert!(app.import_status.is_none());
        assert!(app.import_promise.is_none());
    }

    #[test]
    fn test_status_line_reports_missing_columns() {
        let status = ImportStatus::Imported {
            source: "a.csv".into(),
            records: 1,
            invalid_counts: 0,
            missing_headers: vec!["Country"],
            elapsed: Duration::from_millis(2),
        };
        let (color, line) = status.line();
        assert_eq!(line, "Imported 1 rows from a.csv in 2ms, missing column: Country");
        assert_eq!(color, UI_CONFIG.colors.status_warning);
    }
}
