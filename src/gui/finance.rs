use eframe::egui;
use egui_extras::{Column, TableBuilder};
use serde_json::json;

use crate::gui::{date_label, ConsoleApp};
use crate::store::cache::QueryKey;
use crate::store::records::EXPENSES_TABLE;
use crate::store::worker::{Mutation, MutationOrigin};

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "general",
    "maintenance",
    "utilities",
    "salary",
    "event",
    "supplies",
];

const DEFAULT_CATEGORY: &str = "general";

#[derive(Default)]
pub struct FinanceModule {
    pub dialog: AddExpenseDialog,
}

impl FinanceModule {
    pub fn ui(&mut self, ui: &mut egui::Ui, app: &mut ConsoleApp) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Expenses");
                ui.label(egui::RichText::new("Track all masjid expenses").weak());
            });
            if app.is_admin() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.button("Add Expense").clicked() {
                        self.dialog.open();
                    }
                });
            }
        });
        ui.add_space(8.0);

        if let Some(error) = app.cache.error(QueryKey::Expenses) {
            ui.colored_label(ui.visuals().error_fg_color, error.to_string());
        } else if app.cache.is_loading(QueryKey::Expenses) {
            ui.label("Loading expenses…");
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
            .column(Column::auto().at_least(100.0))
            .column(Column::auto().at_least(100.0));
        if is_admin {
            table = table.column(Column::auto().at_least(70.0));
        }
        table
            .header(20.0, |mut header| {
                header.col(|ui| {
                    ui.strong("Title");
                });
                header.col(|ui| {
                    ui.strong("Category");
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
                for expense in &app.cache.expenses {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&expense.title);
                        });
                        row.col(|ui| {
                            ui.label(&expense.category);
                        });
                        row.col(|ui| {
                            ui.label(format!("₹{}", expense.amount));
                        });
                        row.col(|ui| {
                            ui.label(date_label(expense.expense_date));
                        });
                        if is_admin {
                            row.col(|ui| {
                                if ui.button("Delete").clicked() {
                                    delete_id = Some(expense.id.clone());
                                }
                            });
                        }
                    });
                }
            });

        if let Some(id) = delete_id {
            app.mutate(
                MutationOrigin::DeleteExpense,
                Mutation::Delete {
                    table: EXPENSES_TABLE,
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
            MutationOrigin::AddExpense => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Expenses, QueryKey::Account]);
                    self.dialog.close_and_clear();
                    app.add_success_toast("Expense added successfully");
                }
                Err(message) => {
                    app.add_error_toast(format!("Failed to add expense: {message}"));
                }
            },
            MutationOrigin::DeleteExpense => match result {
                Ok(()) => {
                    app.invalidate(&[QueryKey::Expenses, QueryKey::Account]);
                    app.add_success_toast("Expense deleted successfully");
                }
                Err(message) => {
                    tracing::error!(%message, "expense delete failed");
                }
            },
            _ => {}
        }
    }
}

pub struct AddExpenseDialog {
    pub open: bool,
    pub title: String,
    pub amount: String,
    pub category: String,
    pub description: String,
}

impl Default for AddExpenseDialog {
    fn default() -> Self {
        Self {
            open: false,
            title: String::new(),
            amount: String::new(),
            category: DEFAULT_CATEGORY.to_string(),
            description: String::new(),
        }
    }
}

impl AddExpenseDialog {
    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close_and_clear(&mut self) {
        self.open = false;
        self.title.clear();
        self.amount.clear();
        self.category = DEFAULT_CATEGORY.to_string();
        self.description.clear();
    }

    /// The insert row, or `None` while required fields are missing or the
    /// amount does not parse.
    pub fn payload(&self) -> Option<serde_json::Value> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let amount: f64 = self.amount.trim().parse().ok()?;
        Some(json!({
            "title": title,
            "amount": amount,
            "category": self.category,
            "description": self.description.trim(),
        }))
    }

    pub fn ui(&mut self, ctx: &egui::Context, app: &mut ConsoleApp) {
        if !self.open {
            return;
        }
        let mut submit = false;
        egui::Window::new("Add New Expense")
            .open(&mut self.open)
            .resizable(false)
            .default_width(360.0)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Record a new expense for the masjid").weak());
                ui.add_space(4.0);
                ui.label("Title");
                ui.text_edit_singleline(&mut self.title);
                ui.label("Amount (₹)");
                ui.text_edit_singleline(&mut self.amount);
                ui.label("Category");
                egui::ComboBox::from_id_source("expense_category")
                    .selected_text(self.category.clone())
                    .show_ui(ui, |ui| {
                        for category in EXPENSE_CATEGORIES {
                            ui.selectable_value(
                                &mut self.category,
                                (*category).to_string(),
                                *category,
                            );
                        }
                    });
                ui.label("Description");
                ui.add(egui::TextEdit::multiline(&mut self.description).desired_rows(3));
                ui.add_space(8.0);
                if ui.button("Add Expense").clicked() {
                    submit = true;
                }
            });
        if submit {
            if let Some(row) = self.payload() {
                app.mutate(
                    MutationOrigin::AddExpense,
                    Mutation::Insert {
                        table: EXPENSES_TABLE,
                        row,
                    },
                );
            }
        }
    }
}
