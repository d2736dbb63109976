use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context};
use reqwest::blocking;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::settings::Settings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

/// `order` query parameter in the platform's `column.direction` dialect.
pub fn order_param(column: &str, direction: Direction) -> String {
    format!("{column}.{direction}")
}

/// The five single-table operations the console needs. Implemented by
/// [`StoreClient`] against the hosted platform and by in-memory stores in
/// tests, so the worker can be exercised without a network.
pub trait TableStore: Send {
    fn select(
        &self,
        table: &'static str,
        order: Option<(&'static str, Direction)>,
    ) -> anyhow::Result<Vec<Value>>;

    fn select_one(
        &self,
        table: &'static str,
        filter: Option<(&'static str, String)>,
        order: Option<(&'static str, Direction)>,
    ) -> anyhow::Result<Option<Value>>;

    fn insert(&self, table: &'static str, row: Value) -> anyhow::Result<()>;

    fn update(&self, table: &'static str, id: &str, patch: Value) -> anyhow::Result<()>;

    fn delete(&self, table: &'static str, id: &str) -> anyhow::Result<()>;
}

/// Thin client for the platform's REST interface. Every fetch is a
/// single-table select; the application never issues joins.
pub struct StoreClient {
    base: String,
    api_key: String,
    token: String,
    http: blocking::Client,
}

impl StoreClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        let base = settings.store_url.trim().trim_end_matches('/').to_string();
        if base.is_empty() {
            bail!("store_url is not configured");
        }
        Url::parse(&base).context("store_url is not a valid URL")?;
        if settings.store_api_key.trim().is_empty() {
            bail!("store_api_key is not configured");
        }

        let http = blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        let token = settings
            .access_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| settings.store_api_key.clone());

        Ok(Self {
            base,
            api_key: settings.store_api_key.clone(),
            token,
            http,
        })
    }

    pub fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base, table)
    }

    fn request(&self, method: Method, table: &str) -> blocking::RequestBuilder {
        self.http
            .request(method, self.endpoint(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.token)
    }
}

impl TableStore for StoreClient {
    fn select(
        &self,
        table: &'static str,
        order: Option<(&'static str, Direction)>,
    ) -> anyhow::Result<Vec<Value>> {
        let mut req = self.request(Method::GET, table).query(&[("select", "*")]);
        if let Some((column, direction)) = order {
            req = req.query(&[("order", order_param(column, direction).as_str())]);
        }
        let resp = check(req.send()?)?;
        Ok(resp.json()?)
    }

    fn select_one(
        &self,
        table: &'static str,
        filter: Option<(&'static str, String)>,
        order: Option<(&'static str, Direction)>,
    ) -> anyhow::Result<Option<Value>> {
        let mut req = self
            .request(Method::GET, table)
            .query(&[("select", "*"), ("limit", "1")]);
        if let Some((column, value)) = filter {
            req = req.query(&[(column, format!("eq.{value}").as_str())]);
        }
        if let Some((column, direction)) = order {
            req = req.query(&[("order", order_param(column, direction).as_str())]);
        }
        let rows: Vec<Value> = check(req.send()?)?.json()?;
        Ok(rows.into_iter().next())
    }

    fn insert(&self, table: &'static str, row: Value) -> anyhow::Result<()> {
        let resp = self
            .request(Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()?;
        check(resp)?;
        Ok(())
    }

    fn update(&self, table: &'static str, id: &str, patch: Value) -> anyhow::Result<()> {
        let resp = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{id}").as_str())])
            .header("Prefer", "return=minimal")
            .json(&patch)
            .send()?;
        check(resp)?;
        Ok(())
    }

    fn delete(&self, table: &'static str, id: &str) -> anyhow::Result<()> {
        let resp = self
            .request(Method::DELETE, table)
            .query(&[("id", format!("eq.{id}").as_str())])
            .send()?;
        check(resp)?;
        Ok(())
    }
}

fn check(resp: blocking::Response) -> anyhow::Result<blocking::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    bail!("{}", error_message(status, &body))
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// The platform reports failures as a JSON object with a `message` field.
/// That message is surfaced verbatim; anything else falls back to the HTTP
/// status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.message.is_empty() => parsed.message,
        _ => format!("HTTP {status}"),
    }
}
