mod assets;
mod chanda;
mod committee;
mod finance;
mod namaz;
mod notices;

pub use assets::{AddAssetDialog, AssetsModule};
pub use chanda::{AddChandaDialog, ChandaModule};
pub use committee::{AddMemberDialog, CommitteeModule};
pub use finance::{AddExpenseDialog, FinanceModule, EXPENSE_CATEGORIES};
pub use namaz::{valid_time, EditTimingDialog, NamazModule};
pub use notices::{NoticesModule, PostNoticeDialog, NOTICE_PRIORITIES};

use chrono::{DateTime, Local, NaiveDate, Utc};
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};

use crate::money::rupees;
use crate::session::Role;
use crate::settings::Settings;
use crate::store::cache::{QueryCache, QueryKey};
use crate::store::worker::{Mutation, MutationOrigin, StoreEvent, StoreHandle};

/// Date rendered in the viewer's local convention.
pub fn date_label(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Timestamp rendered in the viewer's local time zone.
pub fn timestamp_label(timestamp: Option<DateTime<Utc>>) -> String {
    match timestamp {
        Some(ts) => {
            let local = ts.with_timezone(&Local);
            format!(
                "{} at {}",
                local.format("%d/%m/%Y"),
                local.format("%H:%M:%S")
            )
        }
        None => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Finance,
    Chanda,
    Assets,
    Committee,
    Namaz,
    Notices,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Finance,
        Tab::Chanda,
        Tab::Assets,
        Tab::Committee,
        Tab::Namaz,
        Tab::Notices,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Finance => "Finance",
            Tab::Chanda => "Chanda",
            Tab::Assets => "Assets",
            Tab::Committee => "Committee",
            Tab::Namaz => "Namaz",
            Tab::Notices => "Notices",
        }
    }
}

/// The dashboard shell: header, summary cards, tab switcher and the six
/// feature modules, plus the store event pump and the toast stack.
pub struct ConsoleApp {
    pub settings: Settings,
    pub store: StoreHandle,
    pub cache: QueryCache,
    pub tab: Tab,
    toasts: Toasts,
    pub finance: FinanceModule,
    pub chanda: ChandaModule,
    pub assets: AssetsModule,
    pub committee: CommitteeModule,
    pub namaz: NamazModule,
    pub notices: NoticesModule,
}

impl ConsoleApp {
    pub fn new(store: StoreHandle, settings: Settings) -> Self {
        let mut cache = QueryCache::default();
        for key in QueryKey::ALL {
            cache.mark_pending(key);
            store.fetch(key);
        }
        Self {
            settings,
            store,
            cache,
            tab: Tab::default(),
            toasts: Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]),
            finance: FinanceModule::default(),
            chanda: ChandaModule::default(),
            assets: AssetsModule::default(),
            committee: CommitteeModule::default(),
            namaz: NamazModule::default(),
            notices: NoticesModule::default(),
        }
    }

    /// The admin gate. False until the role row has been fetched.
    pub fn is_admin(&self) -> bool {
        self.cache.role.map(Role::is_admin).unwrap_or(false)
    }

    pub fn add_success_toast(&mut self, text: impl Into<String>) {
        self.add_toast(ToastKind::Success, text.into());
    }

    pub fn add_error_toast(&mut self, text: impl Into<String>) {
        self.add_toast(ToastKind::Error, text.into());
    }

    fn add_toast(&mut self, kind: ToastKind, text: String) {
        tracing::debug!(%text, "toast");
        if !self.settings.enable_toasts {
            return;
        }
        self.toasts.add(Toast {
            text: text.into(),
            kind,
            options: ToastOptions::default()
                .duration_in_seconds(self.settings.toast_duration as f64),
        });
    }

    pub fn invalidate(&mut self, keys: &[QueryKey]) {
        for key in keys {
            self.cache.invalidate(*key);
        }
    }

    pub fn mutate(&self, origin: MutationOrigin, mutation: Mutation) {
        self.store.mutate(origin, mutation);
    }

    /// Drain completed store work. Row snapshots go straight into the cache;
    /// mutation outcomes are routed to the module that issued them.
    pub fn pump_store_events(&mut self) {
        while let Some(event) = self.store.try_event() {
            match event {
                StoreEvent::Rows { key, result } => self.cache.apply(key, result),
                StoreEvent::MutationDone { origin, result } => {
                    self.dispatch_mutation(origin, result)
                }
            }
        }
    }

    fn dispatch_mutation(&mut self, origin: MutationOrigin, result: Result<(), String>) {
        use MutationOrigin::*;
        match origin {
            AddExpense | DeleteExpense => {
                let mut module = std::mem::take(&mut self.finance);
                module.on_mutation(origin, result, self);
                self.finance = module;
            }
            AddChanda | DeleteChanda => {
                let mut module = std::mem::take(&mut self.chanda);
                module.on_mutation(origin, result, self);
                self.chanda = module;
            }
            AddAsset | DeleteAsset => {
                let mut module = std::mem::take(&mut self.assets);
                module.on_mutation(origin, result, self);
                self.assets = module;
            }
            AddMember | DeleteMember => {
                let mut module = std::mem::take(&mut self.committee);
                module.on_mutation(origin, result, self);
                self.committee = module;
            }
            UpdateTiming => {
                let mut module = std::mem::take(&mut self.namaz);
                module.on_mutation(origin, result, self);
                self.namaz = module;
            }
            PostNotice | DeleteNotice => {
                let mut module = std::mem::take(&mut self.notices);
                module.on_mutation(origin, result, self);
                self.notices = module;
            }
        }
    }

    /// Turn invalidated keys into fetch jobs.
    pub fn schedule_stale_fetches(&mut self) {
        for key in self.cache.take_stale() {
            self.cache.mark_pending(key);
            self.store.fetch(key);
        }
    }

    fn header_ui(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading("Jamia Masjid");
                ui.label(egui::RichText::new("Management System").weak());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let name = self
                    .cache
                    .profile
                    .as_ref()
                    .map(|p| p.full_name.clone())
                    .unwrap_or_else(|| "User".to_string());
                let role = self.cache.role.map(Role::label).unwrap_or("user");
                ui.label(egui::RichText::new(role).weak());
                ui.strong(name);
            });
        });
    }

    fn summary_ui(&self, ui: &mut egui::Ui) {
        let balance = self.cache.account.as_ref().map(|a| a.balance).unwrap_or(0.0);
        let chanda = self
            .cache
            .account
            .as_ref()
            .map(|a| a.total_chanda_collected)
            .unwrap_or(0.0);
        let expenses = self
            .cache
            .account
            .as_ref()
            .map(|a| a.total_expenses)
            .unwrap_or(0.0);

        ui.columns(3, |columns| {
            summary_card(
                &mut columns[0],
                "Balance",
                rupees(balance),
                "Current account balance",
            );
            summary_card(
                &mut columns[1],
                "Total Chanda",
                rupees(chanda),
                "Collected till date",
            );
            summary_card(
                &mut columns[2],
                "Total Expenses",
                rupees(expenses),
                "All time expenses",
            );
        });
    }

    fn active_module_ui(&mut self, ui: &mut egui::Ui) {
        match self.tab {
            Tab::Finance => {
                let mut module = std::mem::take(&mut self.finance);
                module.ui(ui, self);
                self.finance = module;
            }
            Tab::Chanda => {
                let mut module = std::mem::take(&mut self.chanda);
                module.ui(ui, self);
                self.chanda = module;
            }
            Tab::Assets => {
                let mut module = std::mem::take(&mut self.assets);
                module.ui(ui, self);
                self.assets = module;
            }
            Tab::Committee => {
                let mut module = std::mem::take(&mut self.committee);
                module.ui(ui, self);
                self.committee = module;
            }
            Tab::Namaz => {
                let mut module = std::mem::take(&mut self.namaz);
                module.ui(ui, self);
                self.namaz = module;
            }
            Tab::Notices => {
                let mut module = std::mem::take(&mut self.notices);
                module.ui(ui, self);
                self.notices = module;
            }
        }
    }
}

impl eframe::App for ConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_store_events();
        self.schedule_stale_fetches();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(4.0);
            self.header_ui(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.summary_ui(ui);
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    ui.selectable_value(&mut self.tab, tab, tab.label());
                }
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.active_module_ui(ui);
                });
        });

        self.toasts.show(ctx);

        // Worker events arrive between frames; keep polling at a low rate.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}

fn summary_card(ui: &mut egui::Ui, title: &str, value: String, caption: &str) {
    ui.group(|ui| {
        ui.label(title);
        ui.heading(value);
        ui.label(egui::RichText::new(caption).weak().small());
    });
}
