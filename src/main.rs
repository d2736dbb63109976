use eframe::egui;

use masjid_console::gui::ConsoleApp;
use masjid_console::session::Session;
use masjid_console::settings::{Settings, SETTINGS_FILE};
use masjid_console::store::client::StoreClient;
use masjid_console::store::worker::StoreHandle;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    masjid_console::logging::init(settings.debug_logging);

    let client = StoreClient::new(&settings)?;
    let session = Session::from_settings(&settings);
    let store = StoreHandle::spawn(client, session);

    let (width, height) = settings.window_size.unwrap_or((1080.0, 720.0));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Jamia Masjid Management")
            .with_inner_size([width, height])
            .with_min_inner_size([800.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Masjid Console",
        native_options,
        Box::new(move |_cc| Box::new(ConsoleApp::new(store, settings))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start UI: {e}"))?;
    Ok(())
}
