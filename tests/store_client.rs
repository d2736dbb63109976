use masjid_console::settings::Settings;
use masjid_console::store::client::{error_message, order_param, Direction, StoreClient};
use reqwest::StatusCode;

fn settings(url: &str) -> Settings {
    Settings {
        store_url: url.to_string(),
        store_api_key: "anon-key".to_string(),
        ..Settings::default()
    }
}

#[test]
fn order_param_uses_platform_dialect() {
    assert_eq!(order_param("name", Direction::Asc), "name.asc");
    assert_eq!(order_param("expense_date", Direction::Desc), "expense_date.desc");
}

#[test]
fn endpoint_trims_trailing_slash() {
    let client = StoreClient::new(&settings("https://db.example.org/")).unwrap();
    assert_eq!(
        client.endpoint("expenses"),
        "https://db.example.org/rest/v1/expenses"
    );
}

#[test]
fn missing_store_url_is_rejected() {
    let err = StoreClient::new(&settings("")).unwrap_err();
    assert!(err.to_string().contains("store_url"));
}

#[test]
fn invalid_store_url_is_rejected() {
    let err = StoreClient::new(&settings("not a url")).unwrap_err();
    assert!(err.to_string().contains("store_url"));
}

#[test]
fn missing_api_key_is_rejected() {
    let mut bad = settings("https://db.example.org");
    bad.store_api_key = String::new();
    let err = StoreClient::new(&bad).unwrap_err();
    assert!(err.to_string().contains("store_api_key"));
}

#[test]
fn error_message_prefers_the_body_message() {
    let body = r#"{"code":"23505","message":"duplicate key value violates unique constraint"}"#;
    assert_eq!(
        error_message(StatusCode::CONFLICT, body),
        "duplicate key value violates unique constraint"
    );
}

#[test]
fn error_message_falls_back_to_the_status_line() {
    assert_eq!(
        error_message(StatusCode::BAD_REQUEST, ""),
        "HTTP 400 Bad Request"
    );
    assert_eq!(
        error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
        "HTTP 500 Internal Server Error"
    );
}
