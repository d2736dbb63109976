use eframe::egui;
use egui_extras::{Column, TableBuilder};
use serde_json::json;

use crate::gui::{date_label, ConsoleApp};
use crate::money::rupees;
use crate::store::cache::QueryKey;
use crate::store::records::{chanda_total, CHANDA_TABLE};
use crate::store::worker::{Mutation, MutationOrigin};

#[derive(Default)]
pub struct ChandaModule {
    pub dialog: AddChandaDialog,
}

impl ChandaModule {
    pub fn ui(&mut self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Chanda Collection");
                ui.label(
                    egui::RichText::new("Track weekly and total chanda contributions").weak(),
                );
            });
            if app.is_admin() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("Add Chanda").clicked() {
                        self.dialog.open();
                    }
                });
            }
        });
        ui.add_space(8.0);

        // Client-side sum over the loaded rows, not the account aggregate.
        let total = chanda_total(&app.cache.chanda);
        ui.group(|ui| {
            ui.label("Total Collected");
            ui.heading(rupees(total));
        });
        ui.add_space(8.0);

        if let Some(error) = app.cache.error(QueryKey::Chanda) {
            ui.colored_label(ui.visuals().error_fg_color, error.to_string());
        } else if app.cache.is_loading(QueryKey::Chanda) {
            ui.label("Loading chanda records…");
        } else {
            self.table_ui(ui, app);
        }

        self.dialog.ui(ui.ctx(), app);
    }

    fn table_ui(&self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        let is_admin = app.is_admin();
        let mut delete_id: Option<String> = None;

        let mut table = TableBuilder::new(ui)
            .striped(true)
            .column(Column::remainder())
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(100.0));
        if is_admin {
            table = table.column(Column::auto().at_least(70.0));
        }
        table
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Member Name");
                });
                header.col(|ui| {
                    ui.strong("Amount");
                });
                header.col(|ui| {
                    ui.strong("Date");
                });
                if is_admin {
                    header.col(|ui| {
                        ui.strong("Actions");
                    });
                }
            })
            .body(|mut body| {
                for chanda in &app.cache.chanda {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&chanda.member_name);
                        });
                        row.col(|ui| {
                            ui.label(format!("₹{}", chanda.amount));
                        });
                        row.col(|ui| {
                            ui.label(date_label(chanda.collection_date));
                        });
                        if is_admin {
                            row.col(|ui| {
                                if ui.button("Delete").clicked() {
                                    delete_id = Some(chanda.id.clone());
                                }
                            });
                        }
                    });
                }
            });

        if let Some(id) = delete_id {
            app.mutate(
                MutationOrigin::DeleteChanda,
                Mutation::Delete {
                    table: CHANDA_TABLE,
                    id,
                },
            );
        }
    }

    pub fn on_mutation(
        &mut self,
        origin: MutationOrigin,
        result: Result<(), String>,
        app: &mut ConsoleApp,
    ) {
        match origin {
            MutationOrigin::AddChanda => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Chanda, QueryKey::Account]);
                    self.dialog.close_and_clear();
                    app.add_success_toast("Chanda recorded successfully");
                }
                Err(message) => {
                    app.add_error_toast(format!("Failed to record chanda: {message}"));
                }
            },
            MutationOrigin::DeleteChanda => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Chanda, QueryKey::Account]);
                    app.add_success_toast("Chanda record deleted");
                }
                Err(message) => {
                    tracing::error!(%message, "chanda delete failed");
                }
            },
            _ => {}
        }
    }
}

#[derive(Default)]
pub struct AddChandaDialog {
    pub open: bool,
    pub member_name: String,
    pub amount: String,
    pub notes: String,
}

impl AddChandaDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close_and_clear(&mut self) {
        self.open = false;
        self.member_name.clear();
        self.amount.clear();
        self.notes.clear();
    }

    pub fn payload(&self) -> Option<serde_json::Value> {
        let member_name = self.member_name.trim();
        if member_name.is_empty() {
            return None;
        }
        let amount: f64 = self.amount.trim().parse().ok()?;
        Some(json!({
            "member_name": member_name,
            "amount": amount,
            "notes": self.notes.trim(),
        }))
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut ConsoleApp) {
        if !self.open {
            return;
        }
        let mut submit = false;
        egui::Window::new("Record Chanda Collection")
            .open(&mut self.open)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Add a new chanda contribution").weak());
                ui.add_space(4.0);
                ui.label("Member Name");
                ui.text_edit_singleline(&mut self.member_name);
                ui.label("Amount (₹)");
                ui.text_edit_singleline(&mut self.amount);
                ui.label("Notes (Optional)");
                ui.text_edit_singleline(&mut self.notes);
                ui.add_space(8.0);
                if ui.button("Record Chanda").clicked() {
                    submit = true;
                }
            });
        if submit {
            if let Some(row) = self.payload() {
                app.mutate(
                    MutationOrigin::AddChanda,
                    Mutation::Insert {
                        table: CHANDA_TABLE,
                        row,
                    },
                );
            }
        }
    }
}
