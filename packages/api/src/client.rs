//! # ApiClient — request plumbing and endpoint wrappers
//!
//! One [`ApiClient`] per process is enough; it owns a [`reqwest::Client`] and
//! the base URL, resolved once at construction from the build-time environment
//! (`TRADEJOURNAL_API_URL`) with a local-development fallback.
//!
//! Every endpoint wrapper funnels through [`ApiClient::call`], which performs
//! exactly one request and hands the raw outcome to [`interpret`]: non-2xx
//! responses become [`ApiError::Http`], JSON-labelled bodies are parsed, and
//! everything else comes back as text. There is deliberately no retry, no
//! timeout and no cache at this layer; stores above decide what to do with a
//! failure.

use chrono::NaiveDate;
use reqwest::{header, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::ApiError;
use crate::models::{
    DayJournal, DayJournalUpdate, ExportData, NewDayJournal, NewTag, NewTrade, Tag, TokenExchange,
    Trade, TradeSummary, TradeUpdate,
};

const BASE_URL_ENV: Option<&str> = option_env!("TRADEJOURNAL_API_URL");
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// A response body: JSON when the server says so, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Payload::Json(value) => Ok(serde_json::from_value(value)?),
            Payload::Text(_) => Err(ApiError::Decode(serde::de::Error::custom(
                "expected a JSON response",
            ))),
        }
    }
}

/// Rewrite the one key where form payloads and the backend disagree:
/// `tradingLink` becomes `trading_link`, empty values become `null`.
pub fn to_snake_case_payload(mut payload: Value) -> Value {
    if let Some(map) = payload.as_object_mut() {
        if let Some(value) = map.remove("tradingLink") {
            let value = match value {
                Value::String(s) if s.is_empty() => Value::Null,
                Value::Bool(false) | Value::Null => Value::Null,
                other => other,
            };
            map.insert("trading_link".to_string(), value);
        }
    }
    payload
}

/// Turn a raw HTTP outcome into a [`Payload`] or an [`ApiError::Http`].
fn interpret(status: StatusCode, content_type: Option<&str>, body: String) -> Result<Payload, ApiError> {
    if !status.is_success() {
        let body = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            body
        };
        return Err(ApiError::Http {
            status: status.as_u16(),
            body,
        });
    }
    match content_type {
        Some(ct) if ct.contains("application/json") => Ok(Payload::Json(serde_json::from_str(&body)?)),
        _ => Ok(Payload::Text(body)),
    }
}

/// HTTP client for the journal backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Client against the configured base URL.
    pub fn new() -> Self {
        let configured = BASE_URL_ENV.unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(configured)
            .unwrap_or_else(|_| Url::parse(DEFAULT_BASE_URL).expect("default base URL parses"));
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Client against an explicit base URL (tests, tooling).
    pub fn with_base_url(base: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base)?,
            http: reqwest::Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL. Each segment is percent-encoded, so record ids
    /// are safe to splice into paths.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    /// Perform one request. Bodies are JSON; responses go through
    /// [`interpret`].
    async fn call(&self, method: Method, url: Url, body: Option<Value>) -> Result<Payload, ApiError> {
        tracing::debug!(%url, %method, "api call");
        let request = match body {
            Some(json) => self.http.request(method, url).json(&json),
            None => self
                .http
                .request(method, url)
                .header(header::CONTENT_TYPE, "application/json"),
        };
        let response = request.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let text = response.text().await.unwrap_or_default();
        interpret(status, content_type.as_deref(), text)
    }

    // Trades

    pub async fn trades(&self) -> Result<Vec<Trade>, ApiError> {
        self.call(Method::GET, self.endpoint(&["trades"]), None)
            .await?
            .decode()
    }

    pub async fn create_trade(&self, trade: &NewTrade) -> Result<Trade, ApiError> {
        let body = to_snake_case_payload(serde_json::to_value(trade)?);
        self.call(Method::POST, self.endpoint(&["trades"]), Some(body))
            .await?
            .decode()
    }

    pub async fn update_trade(&self, id: &str, update: &TradeUpdate) -> Result<Trade, ApiError> {
        let body = to_snake_case_payload(serde_json::to_value(update)?);
        self.call(Method::PUT, self.endpoint(&["trades", id]), Some(body))
            .await?
            .decode()
    }

    pub async fn delete_trade(&self, id: &str) -> Result<(), ApiError> {
        self.call(Method::DELETE, self.endpoint(&["trades", id]), None)
            .await?;
        Ok(())
    }

    pub async fn trade_summary(&self) -> Result<TradeSummary, ApiError> {
        self.call(Method::GET, self.endpoint(&["trades", "stats", "summary"]), None)
            .await?
            .decode()
    }

    // Emotions

    pub async fn emotions(&self) -> Result<Vec<Tag>, ApiError> {
        self.call(Method::GET, self.endpoint(&["emotions"]), None)
            .await?
            .decode()
    }

    pub async fn create_emotion(&self, tag: &NewTag) -> Result<Tag, ApiError> {
        let body = serde_json::to_value(tag)?;
        self.call(Method::POST, self.endpoint(&["emotions"]), Some(body))
            .await?
            .decode()
    }

    pub async fn delete_emotion(&self, id: &str) -> Result<(), ApiError> {
        self.call(Method::DELETE, self.endpoint(&["emotions", id]), None)
            .await?;
        Ok(())
    }

    // Confirmations

    pub async fn confirmations(&self) -> Result<Vec<Tag>, ApiError> {
        self.call(Method::GET, self.endpoint(&["confirmations"]), None)
            .await?
            .decode()
    }

    pub async fn create_confirmation(&self, tag: &NewTag) -> Result<Tag, ApiError> {
        let body = serde_json::to_value(tag)?;
        self.call(Method::POST, self.endpoint(&["confirmations"]), Some(body))
            .await?
            .decode()
    }

    pub async fn delete_confirmation(&self, id: &str) -> Result<(), ApiError> {
        self.call(Method::DELETE, self.endpoint(&["confirmations", id]), None)
            .await?;
        Ok(())
    }

    // Day journal

    pub async fn day_journal(&self) -> Result<Vec<DayJournal>, ApiError> {
        self.call(Method::GET, self.endpoint(&["day-journal"]), None)
            .await?
            .decode()
    }

    /// Entries with `start <= date <= end`, e.g. one calendar month.
    pub async fn day_journal_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DayJournal>, ApiError> {
        let mut url = self.endpoint(&["day-journal", "range"]);
        url.query_pairs_mut()
            .append_pair("start_date", &start.to_string())
            .append_pair("end_date", &end.to_string());
        self.call(Method::GET, url, None).await?.decode()
    }

    pub async fn create_day_journal(&self, entry: &NewDayJournal) -> Result<DayJournal, ApiError> {
        let body = serde_json::to_value(entry)?;
        self.call(Method::POST, self.endpoint(&["day-journal"]), Some(body))
            .await?
            .decode()
    }

    pub async fn update_day_journal(
        &self,
        id: &str,
        update: &DayJournalUpdate,
    ) -> Result<DayJournal, ApiError> {
        let body = serde_json::to_value(update)?;
        self.call(Method::PUT, self.endpoint(&["day-journal", id]), Some(body))
            .await?
            .decode()
    }

    pub async fn delete_day_journal(&self, id: &str) -> Result<(), ApiError> {
        self.call(Method::DELETE, self.endpoint(&["day-journal", id]), None)
            .await?;
        Ok(())
    }

    // Auth

    /// Trade an identity-provider token for an application token + profile.
    pub async fn exchange_identity_token(&self, id_token: &str) -> Result<TokenExchange, ApiError> {
        let body = serde_json::json!({ "id_token": id_token });
        self.call(Method::POST, self.endpoint(&["auth", "firebase"]), Some(body))
            .await?
            .decode()
    }

    // Export

    pub async fn export_all(&self) -> Result<ExportData, ApiError> {
        self.call(Method::GET, self.endpoint(&["export", "all"]), None)
            .await?
            .decode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Side;
    use serde_json::json;

    #[test]
    fn trading_link_key_is_rewritten() {
        let payload = to_snake_case_payload(json!({
            "symbol": "EURUSD",
            "tradingLink": "https://charts.example.com/abc",
        }));
        let map = payload.as_object().unwrap();
        assert_eq!(
            map.get("trading_link"),
            Some(&json!("https://charts.example.com/abc"))
        );
        assert!(!map.contains_key("tradingLink"));
    }

    #[test]
    fn falsy_trading_link_becomes_null() {
        for falsy in [json!(""), json!(null), json!(false)] {
            let payload = to_snake_case_payload(json!({ "tradingLink": falsy }));
            assert_eq!(payload.as_object().unwrap().get("trading_link"), Some(&json!(null)));
        }
    }

    #[test]
    fn payload_without_trading_link_is_untouched() {
        let original = json!({ "symbol": "BTCUSD", "rate": 1.5 });
        assert_eq!(to_snake_case_payload(original.clone()), original);
    }

    #[test]
    fn new_trade_serializes_snake_case_only() {
        let trade = NewTrade {
            symbol: "EURUSD".to_string(),
            side: Side::Buy,
            date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            rate: 1.08,
            risk: Some(1.0),
            result: None,
            status: None,
            notes: None,
            emotions: vec!["Calma".to_string()],
            confirmations: vec![],
            trading_link: None,
            user_id: None,
        };
        let body = to_snake_case_payload(serde_json::to_value(&trade).unwrap());
        let map = body.as_object().unwrap();
        assert!(map.contains_key("trading_link"));
        assert!(!map.contains_key("tradingLink"));
        assert_eq!(map.get("date"), Some(&json!("2024-10-01")));
        assert_eq!(map.get("side"), Some(&json!("buy")));
    }

    #[test]
    fn non_success_carries_status_in_message() {
        let err = interpret(StatusCode::NOT_FOUND, None, "Trade not found".to_string())
            .unwrap_err();
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Trade not found"));
    }

    #[test]
    fn empty_error_body_falls_back_to_reason_phrase() {
        let err = interpret(StatusCode::INTERNAL_SERVER_ERROR, None, String::new()).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn json_content_type_parses_body() {
        let payload = interpret(
            StatusCode::OK,
            Some("application/json; charset=utf-8"),
            r#"{"ok":true}"#.to_string(),
        )
        .unwrap();
        assert_eq!(payload, Payload::Json(json!({ "ok": true })));
    }

    #[test]
    fn other_content_types_come_back_as_text() {
        let payload = interpret(StatusCode::OK, Some("text/plain"), "pong".to_string()).unwrap();
        assert_eq!(payload, Payload::Text("pong".to_string()));
        let payload = interpret(StatusCode::OK, None, "pong".to_string()).unwrap();
        assert_eq!(payload, Payload::Text("pong".to_string()));
    }

    #[test]
    fn endpoint_segments_are_percent_encoded() {
        let client = ApiClient::with_base_url("http://localhost:8000").unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
        let url = client.endpoint(&["trades", "a/b c"]);
        assert_eq!(url.as_str(), "http://localhost:8000/trades/a%2Fb%20c");
    }

    #[test]
    fn trade_update_omits_unset_fields() {
        let update = TradeUpdate {
            notes: Some("moved stop to break-even".to_string()),
            ..TradeUpdate::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        let map = body.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("notes"));
    }
}
