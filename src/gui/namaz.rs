use chrono::NaiveTime;
use eframe::egui;
use serde_json::json;

use crate::gui::ConsoleApp;
use crate::store::cache::QueryKey;
use crate::store::records::{NamazTiming, NAMAZ_TABLE};
use crate::store::worker::{Mutation, MutationOrigin};

/// Accepts what a time field would: `HH:MM` or `HH:MM:SS`.
pub fn valid_time(value: &str) -> bool {
    NaiveTime::parse_from_str(value, "%H:%M").is_ok()
        || NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
}

#[derive(Default)]
pub struct NamazModule {
    pub dialog: EditTimingDialog,
}

impl NamazModule {
    pub fn ui(&mut self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        ui.heading("Namaz Timings");
        ui.label(egui::RichText::new("View and manage prayer times").weak());
        ui.add_space(8.0);

        if let Some(error) = app.cache.error(QueryKey::NamazTimings) {
            ui.colored_label(ui.visuals().error_fg_color, error.to_string());
        } else if app.cache.is_loading(QueryKey::NamazTimings) {
            ui.label("Loading prayer times…");
        } else {
            self.grid_ui(ui, app);
        }

        self.dialog.ui(ui.ctx(), app);
    }

    fn grid_ui(&mut self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        let is_admin = app.is_admin();
        let mut edit: Option<NamazTiming> = None;

        for chunk in app.cache.namaz_timings.chunks(3) {
            ui.columns(3, |columns| {
                for (i, timing) in chunk.iter().enumerate() {
                    columns[i].group(|ui| {
                        ui.horizontal(|ui| {
                            ui.strong(&timing.prayer_name);
                            if is_admin {
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Min),
                                    |ui| {
                                        if ui.button("Edit").clicked() {
                                            edit = Some(timing.clone());
                                        }
                                    },
                                );
                            }
                        });
                        ui.heading(timing.display_time());
                    });
                }
            });
            ui.add_space(6.0);
        }

        if let Some(timing) = edit {
            self.dialog.open_for(&timing);
        }
    }

    pub fn on_mutation(
        &mut self,
        origin: MutationOrigin,
        result: Result<(), String>,
        app: &mut ConsoleApp,
    ) {
        if origin != MutationOrigin::UpdateTiming {
            return;
        }
        match result {
            Ok(()) => {
                app.invalidate(&[QueryKey::NamazTimings]);
                self.dialog.close_and_clear();
                app.add_success_toast("Prayer time updated");
            }
            Err(message) => {
                tracing::error!(%message, "prayer time update failed");
            }
        }
    }
}

#[derive(Default)]
pub struct EditTimingDialog {
    pub open: bool,
    pub timing_id: String,
    pub prayer_name: String,
    pub time: String,
}

impl EditTimingDialog {
    pub fn open_for(&mut self, timing: &NamazTiming) {
        self.open = true;
        self.timing_id = timing.id.clone();
        self.prayer_name = timing.prayer_name.clone();
        self.time = timing.prayer_time.clone();
    }

    pub fn close_and_clear(&mut self) {
        self.open = false;
        self.timing_id.clear();
        self.prayer_name.clear();
        self.time.clear();
    }

    /// The single-field update, or `None` while the time does not parse.
    pub fn payload(&self) -> Option<serde_json::Value> {
        let time = self.time.trim();
        if !valid_time(time) {
            return None;
        }
        Some(json!({ "prayer_time": time }))
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut ConsoleApp) {
        if !self.open {
            return;
        }
        let mut submit = false;
        egui::Window::new("Edit Prayer Time")
            .open(&mut self.open)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(format!("Update the time for {}", self.prayer_name))
                        .weak(),
                );
                ui.add_space(4.0);
                ui.label("Time");
                ui.text_edit_singleline(&mut self.time);
                ui.add_space(8.0);
                if ui.button("Update Time").clicked() {
                    submit = true;
                }
            });
        if submit {
            if let Some(patch) = self.payload() {
                app.mutate(
                    MutationOrigin::UpdateTiming,
                    Mutation::Update {
                        table: NAMAZ_TABLE,
                        id: self.timing_id.clone(),
                        patch,
                    },
                );
            }
        }
    }
}
