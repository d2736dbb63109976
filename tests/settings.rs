use masjid_console::settings::Settings;
use tempfile::tempdir;

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = Settings::load(path.to_str().unwrap()).unwrap();
    assert!(settings.store_url.is_empty());
    assert!(settings.enable_toasts);
    assert_eq!(settings.toast_duration, 4.0);
    assert!(!settings.debug_logging);
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(
        &path,
        r#"{"store_url": "https://db.example.org", "store_api_key": "anon"}"#,
    )
    .unwrap();

    let settings = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(settings.store_url, "https://db.example.org");
    assert!(settings.enable_toasts);
    assert!(settings.user_id.is_none());
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut settings = Settings::default();
    settings.store_url = "https://db.example.org".to_string();
    settings.store_api_key = "anon".to_string();
    settings.user_id = Some("u1".to_string());
    settings.toast_duration = 2.5;
    settings.save(path.to_str().unwrap()).unwrap();

    let loaded = Settings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded.store_url, settings.store_url);
    assert_eq!(loaded.user_id.as_deref(), Some("u1"));
    assert_eq!(loaded.toast_duration, 2.5);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    std::fs::write(&path, "{not json").unwrap();
    assert!(Settings::load(path.to_str().unwrap()).is_err());
}
