use eframe::egui;
use egui_extras::{Column, TableBuilder};
use serde_json::json;

use crate::gui::ConsoleApp;
use crate::store::cache::QueryKey;
use crate::store::records::ASSETS_TABLE;
use crate::store::worker::{Mutation, MutationOrigin};

#[derive(Default)]
pub struct AssetsModule {
    pub dialog: AddAssetDialog,
}

impl AssetsModule {
    pub fn ui(&mut self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Masjid Assets");
                ui.label(
                    egui::RichText::new("Manage cooking materials and other items").weak(),
                );
            });
            if app.is_admin() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("Add Asset").clicked() {
                        self.dialog.open();
                    }
                });
            }
        });
        ui.add_space(8.0);

        if let Some(error) = app.cache.error(QueryKey::Assets) {
            ui.colored_label(ui.visuals().error_fg_color, error.to_string());
        } else if app.cache.is_loading(QueryKey::Assets) {
            ui.label("Loading assets…");
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
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(140.0));
        if is_admin {
            table = table.column(Column::auto().at_least(70.0));
        }
        table
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Item Name");
                });
                header.col(|ui| {
                    ui.strong("Quantity");
                });
                header.col(|ui| {
                    ui.strong("Condition");
                });
                if is_admin {
                    header.col(|ui| {
                        ui.strong("Actions");
                    });
                }
            })
            .body(|mut body| {
                for asset in &app.cache.assets {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&asset.item_name);
                        });
                        row.col(|ui| {
                            ui.label(
                                asset
                                    .quantity
                                    .map(|q| q.to_string())
                                    .unwrap_or_default(),
                            );
                        });
                        row.col(|ui| {
                            let condition = asset
                                .condition
                                .as_deref()
                                .filter(|c| !c.is_empty())
                                .unwrap_or("N/A");
                            ui.label(condition);
                        });
                        if is_admin {
                            row.col(|ui| {
                                if ui.button("Delete").clicked() {
                                    delete_id = Some(asset.id.clone());
                                }
                            });
                        }
                    });
                }
            });

        if let Some(id) = delete_id {
            app.mutate(
                MutationOrigin::DeleteAsset,
                Mutation::Delete {
                    table: ASSETS_TABLE,
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
            MutationOrigin::AddAsset => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Assets]);
                    self.dialog.close_and_clear();
                    app.add_success_toast("Asset added successfully");
                }
                // No failure toast for this module; the dialog stays open
                // with the entered values.
                Err(message) => {
                    tracing::error!(%message, "asset insert failed");
                }
            },
            MutationOrigin::DeleteAsset => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Assets]);
                    app.add_success_toast("Asset deleted");
                }
                Err(message) => {
                    tracing::error!(%message, "asset delete failed");
                }
            },
            _ => {}
        }
    }
}

pub struct AddAssetDialog {
    pub open: bool,
    pub item_name: String,
    pub quantity: String,
    pub condition: String,
}

impl Default for AddAssetDialog {
    fn default() -> Self {
        Self {
            open: false,
            item_name: String::new(),
            quantity: "1".to_string(),
            condition: String::new(),
        }
    }
}

impl AddAssetDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close_and_clear(&mut self) {
        self.open = false;
        self.item_name.clear();
        self.quantity = "1".to_string();
        self.condition.clear();
    }

    pub fn payload(&self) -> Option<serde_json::Value> {
        let item_name = self.item_name.trim();
        if item_name.is_empty() {
            return None;
        }
        let quantity: i64 = self.quantity.trim().parse().ok()?;
        Some(json!({
            "item_name": item_name,
            "quantity": quantity,
            "condition": self.condition.trim(),
        }))
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut ConsoleApp) {
        if !self.open {
            return;
        }
        let mut submit = false;
        egui::Window::new("Add New Asset")
            .open(&mut self.open)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Record a new item in the inventory").weak());
                ui.add_space(4.0);
                ui.label("Item Name");
                ui.text_edit_singleline(&mut self.item_name);
                ui.label("Quantity");
                ui.text_edit_singleline(&mut self.quantity);
                ui.label("Condition");
                ui.add(
                    egui::TextEdit::singleline(&mut self.condition)
                        .hint_text("Good, Fair, Needs Repair, etc."),
                );
                ui.add_space(8.0);
                if ui.button("Add Asset").clicked() {
                    submit = true;
                }
            });
        if submit {
            if let Some(row) = self.payload() {
                app.mutate(
                    MutationOrigin::AddAsset,
                    Mutation::Insert {
                        table: ASSETS_TABLE,
                        row,
                    },
                );
            }
        }
    }
}
