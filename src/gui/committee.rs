use eframe::egui;
use egui_extras::{Column, TableBuilder};
use serde_json::json;

use crate::gui::ConsoleApp;
use crate::store::cache::QueryKey;
use crate::store::records::COMMITTEE_TABLE;
use crate::store::worker::{Mutation, MutationOrigin};

#[derive(Default)]
pub struct CommitteeModule {
    pub dialog: AddMemberDialog,
}

impl CommitteeModule {
    pub fn ui(&mut self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Committee Members");
                ui.label(
                    egui::RichText::new("Manage masjid committee and personnel").weak(),
                );
            });
            if app.is_admin() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("Add Member").clicked() {
                        self.dialog.open();
                    }
                });
            }
        });
        ui.add_space(8.0);

        if let Some(error) = app.cache.error(QueryKey::Committee) {
            ui.colored_label(ui.visuals().error_fg_color, error.to_string());
        } else if app.cache.is_loading(QueryKey::Committee) {
            ui.label("Loading committee…");
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
            .column(Column::auto().at_least(120.0))
            .column(Column::auto().at_least(180.0));
        if is_admin {
            table = table.column(Column::auto().at_least(70.0));
        }
        table
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Name");
                });
                header.col(|ui| {
                    ui.strong("Role");
                });
                header.col(|ui| {
                    ui.strong("Contact");
                });
                if is_admin {
                    header.col(|ui| {
                        ui.strong("Actions");
                    });
                }
            })
            .body(|mut body| {
                for member in &app.cache.committee {
                    body.row(30.0, |mut row| {
                        row.col(|ui| {
                            ui.horizontal(|ui| {
                                ui.label(&member.name);
                                if member.is_leader.unwrap_or(false) {
                                    ui.label(egui::RichText::new("Leader").small().strong());
                                }
                                if member.is_accountant.unwrap_or(false) {
                                    ui.label(
                                        egui::RichText::new("Accountant").small().strong(),
                                    );
                                }
                            });
                        });
                        row.col(|ui| {
                            ui.label(&member.role);
                        });
                        row.col(|ui| {
                            ui.vertical(|ui| {
                                if let Some(phone) = member.phone.as_deref() {
                                    if !phone.is_empty() {
                                        ui.label(phone);
                                    }
                                }
                                if let Some(email) = member.email.as_deref() {
                                    if !email.is_empty() {
                                        ui.label(egui::RichText::new(email).weak());
                                    }
                                }
                            });
                        });
                        if is_admin {
                            row.col(|ui| {
                                if ui.button("Delete").clicked() {
                                    delete_id = Some(member.id.clone());
                                }
                            });
                        }
                    });
                }
            });

        if let Some(id) = delete_id {
            app.mutate(
                MutationOrigin::DeleteMember,
                Mutation::Delete {
                    table: COMMITTEE_TABLE,
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
            MutationOrigin::AddMember => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Committee]);
                    self.dialog.close_and_clear();
                    app.add_success_toast("Committee member added");
                }
                Err(message) => {
                    tracing::error!(%message, "committee insert failed");
                }
            },
            MutationOrigin::DeleteMember => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Committee]);
                    app.add_success_toast("Member removed");
                }
                Err(message) => {
                    tracing::error!(%message, "committee delete failed");
                }
            },
            _ => {}
        }
    }
}

#[derive(Default)]
pub struct AddMemberDialog {
    pub open: bool,
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
}

impl AddMemberDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close_and_clear(&mut self) {
        self.open = false;
        self.name.clear();
        self.role.clear();
        self.phone.clear();
        self.email.clear();
    }

    pub fn payload(&self) -> Option<serde_json::Value> {
        let name = self.name.trim();
        let role = self.role.trim();
        if name.is_empty() || role.is_empty() {
            return None;
        }
        Some(json!({
            "name": name,
            "role": role,
            "phone": self.phone.trim(),
            "email": self.email.trim(),
        }))
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut ConsoleApp) {
        if !self.open {
            return;
        }
        let mut submit = false;
        egui::Window::new("Add Committee Member")
            .open(&mut self.open)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Add a new person to the committee").weak());
                ui.add_space(4.0);
                ui.label("Full Name");
                ui.text_edit_singleline(&mut self.name);
                ui.label("Role");
                ui.add(
                    egui::TextEdit::singleline(&mut self.role)
                        .hint_text("e.g., President, Secretary, Member"),
                );
                ui.label("Phone");
                ui.text_edit_singleline(&mut self.phone);
                ui.label("Email");
                ui.text_edit_singleline(&mut self.email);
                ui.add_space(8.0);
                if ui.button("Add Member").clicked() {
                    submit = true;
                }
            });
        if submit {
            if let Some(row) = self.payload() {
                app.mutate(
                    MutationOrigin::AddMember,
                    Mutation::Insert {
                        table: COMMITTEE_TABLE,
                        row,
                    },
                );
            }
        }
    }
}
