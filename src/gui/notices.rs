use eframe::egui;
use serde_json::json;

use crate::gui::{timestamp_label, ConsoleApp};
use crate::store::cache::QueryKey;
use crate::store::records::NOTIFICATIONS_TABLE;
use crate::store::worker::{Mutation, MutationOrigin};

pub const NOTICE_PRIORITIES: &[&str] = &["low", "normal", "high"];

const DEFAULT_PRIORITY: &str = "normal";

fn priority_color(priority: &str) -> egui::Color32 {
    match priority {
        "high" => egui::Color32::from_rgb(0xc0, 0x3a, 0x3a),
        "low" => egui::Color32::GRAY,
        _ => egui::Color32::from_rgb(0x2e, 0x7d, 0x5b),
    }
}

#[derive(Default)]
pub struct NoticesModule {
    pub dialog: PostNoticeDialog,
}

impl NoticesModule {
    pub fn ui(&mut self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Notifications");
                ui.label(egui::RichText::new("Masjid announcements and notices").weak());
            });
            if app.is_admin() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("New Notice").clicked() {
                        self.dialog.open();
                    }
                });
            }
        });
        ui.add_space(8.0);

        if let Some(error) = app.cache.error(QueryKey::Notifications) {
            ui.colored_label(ui.visuals().error_fg_color, error.to_string());
        } else if app.cache.is_loading(QueryKey::Notifications) {
            ui.label("Loading notices…");
        } else {
            self.list_ui(ui, app);
        }

        self.dialog.ui(ui.ctx(), app);
    }

    fn list_ui(&self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        let is_admin = app.is_admin();
        let mut delete_id: Option<String> = None;

        for notice in &app.cache.notifications {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.strong(&notice.title);
                    let priority = notice.priority_label();
                    ui.colored_label(priority_color(priority), priority);
                    if is_admin {
                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Min),
                            |ui| {
                                if ui.button("Delete").clicked() {
                                    delete_id = Some(notice.id.clone());
                                }
                            },
                        );
                    }
                });
                ui.label(
                    egui::RichText::new(timestamp_label(notice.created_at))
                        .weak()
                        .small(),
                );
                ui.label(&notice.message);
            });
            ui.add_space(6.0);
        }

        if let Some(id) = delete_id {
            app.mutate(
                MutationOrigin::DeleteNotice,
                Mutation::Delete {
                    table: NOTIFICATIONS_TABLE,
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
            MutationOrigin::PostNotice => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Notifications]);
                    self.dialog.close_and_clear();
                    app.add_success_toast("Notification posted");
                }
                Err(message) => {
                    tracing::error!(%message, "notification insert failed");
                }
            },
            MutationOrigin::DeleteNotice => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Notifications]);
                    app.add_success_toast("Notification deleted");
                }
                Err(message) => {
                    tracing::error!(%message, "notification delete failed");
                }
            },
            _ => {}
        }
    }
}

pub struct PostNoticeDialog {
    pub open: bool,
    pub title: String,
    pub message: String,
    pub priority: String,
}

impl Default for PostNoticeDialog {
    fn default() -> Self {
        Self {
            open: false,
            title: String::new(),
            message: String::new(),
            priority: DEFAULT_PRIORITY.to_string(),
        }
    }
}

impl PostNoticeDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close_and_clear(&mut self) {
        self.open = false;
        self.title.clear();
        self.message.clear();
        self.priority = DEFAULT_PRIORITY.to_string();
    }

    pub fn payload(&self) -> Option<serde_json::Value> {
        let title = self.title.trim();
        let message = self.message.trim();
        if title.is_empty() || message.is_empty() {
            return None;
        }
        Some(json!({
            "title": title,
            "message": message,
            "priority": self.priority,
        }))
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut ConsoleApp) {
        if !self.open {
            return;
        }
        let mut submit = false;
        egui::Window::new("Post New Notification")
            .open(&mut self.open)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Send a notice to all members").weak());
                ui.add_space(4.0);
                ui.label("Title");
                ui.text_edit_singleline(&mut self.title);
                ui.label("Message");
                ui.add(egui::TextEdit::multiline(&mut self.message).desired_rows(4));
                ui.label("Priority");
                egui::ComboBox::from_id_source("notice_priority")
                    .selected_text(self.priority.clone())
                    .show_ui(ui, |ui| {
                        for priority in NOTICE_PRIORITIES {
                            ui.selectable_value(
                                &mut self.priority,
                                (*priority).to_string(),
                                *priority,
                            );
                        }
                    });
                ui.add_space(8.0);
                if ui.button("Post Notification").clicked() {
                    submit = true;
                }
            });
        if submit {
            if let Some(row) = self.payload() {
                app.mutate(
                    MutationOrigin::PostNotice,
                    Mutation::Insert {
                        table: NOTIFICATIONS_TABLE,
                        row,
                    },
                );
            }
        }
    }
}
