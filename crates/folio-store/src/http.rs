//! HTTP implementation of [`ContentSource`].
//!
//! Every response goes through [`check_response`] before its list envelope
//! is read. Database queries follow `next_cursor` until the store reports
//! the last page.

use std::collections::HashSet;
use std::future::Future;
use std::time::Duration;

use folio_config::StoreConfig;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

use crate::error::StoreError;
use crate::record::{RawBlock, RawRecord};
use crate::{ChildPage, ContentSource, QueryRequest};

const API_VERSION_HEADER: &str = "notion-version";

#[derive(Deserialize)]
struct ListEnvelope {
    results: Vec<serde_json::Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

/// Content store client over the store's REST API.
#[derive(Clone)]
pub struct HttpContentStore {
    http: reqwest::Client,
    base_url: String,
}

impl HttpContentStore {
    /// Build a client that sends the configured token and API version on
    /// every request.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidHeader`] if the token or version cannot be
    /// used as a header value, or [`StoreError::Http`] if the client fails to build.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| StoreError::InvalidHeader {
                header: "authorization",
            })?;
        headers.insert(AUTHORIZATION, auth);
        let version = HeaderValue::from_str(&config.api_version).map_err(|_| {
            StoreError::InvalidHeader {
                header: API_VERSION_HEADER,
            }
        })?;
        headers.insert(API_VERSION_HEADER, version);

        let http = reqwest::Client::builder()
            .user_agent("folio/0.1")
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl ContentSource for HttpContentStore {
    async fn query(&self, request: &QueryRequest) -> Result<Vec<RawRecord>, StoreError> {
        let url = format!(
            "{}/databases/{}/query",
            self.base_url,
            urlencoding::encode(&request.database_id)
        );
        let results = collect_pages(|cursor| {
            let pending = self.http.post(&url).json(&request.body(cursor.as_deref()));
            async move { read_envelope(check_response(pending.send().await?).await?).await }
        })
        .await?;
        tracing::debug!(
            database_id = %request.database_id,
            count = results.len(),
            "query complete"
        );
        Ok(parse_entries(results, "record"))
    }

    async fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ChildPage, StoreError> {
        let mut url = format!(
            "{}/blocks/{}/children?page_size={page_size}",
            self.base_url,
            urlencoding::encode(block_id)
        );
        if let Some(cursor) = cursor {
            url.push_str("&start_cursor=");
            url.push_str(&urlencoding::encode(cursor));
        }
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let envelope = read_envelope(resp).await?;
        Ok(ChildPage {
            blocks: parse_entries::<RawBlock>(envelope.results, "block"),
            next_cursor: envelope.next_cursor.filter(|_| envelope.has_more),
        })
    }
}

/// Fetch pages one after another, feeding each page's cursor into the next
/// request, until the store reports no further results.
async fn collect_pages<F, Fut>(mut fetch: F) -> Result<Vec<serde_json::Value>, StoreError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<ListEnvelope, StoreError>>,
{
    let mut results = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = None;
    loop {
        let page = fetch(cursor.take()).await?;
        results.extend(page.results);
        let next = match page.next_cursor {
            Some(next) if page.has_more => next,
            _ => return Ok(results),
        };
        if !seen.insert(next.clone()) {
            return Err(StoreError::RepeatedCursor { cursor: next });
        }
        cursor = Some(next);
    }
}

async fn read_envelope(resp: reqwest::Response) -> Result<ListEnvelope, StoreError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Parse(format!("list envelope: {e}")))
}

/// Decode envelope entries one by one. Entries without the minimal shape
/// (an object with an `id`) cannot be attributed to a record and are skipped.
fn parse_entries<T: serde::de::DeserializeOwned>(
    results: Vec<serde_json::Value>,
    what: &'static str,
) -> Vec<T> {
    results
        .into_iter()
        .filter_map(|value| {
            let id = value
                .get("id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("<none>")
                .to_string();
            serde_json::from_value(value)
                .map_err(|e| tracing::warn!(what, id = %id, %e, "skipping unreadable store entry"))
                .ok()
        })
        .collect()
}

/// Pass a store response through when its status is 2xx.
///
/// # Errors
///
/// A 429 becomes [`StoreError::RateLimited`] carrying the store's
/// `Retry-After` seconds. Any other failing status becomes
/// [`StoreError::Api`] with the response text as the message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(StoreError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }
    Err(StoreError::Api {
        status: status.as_u16(),
        message: resp.text().await.unwrap_or_default(),
    })
}

/// Wait the store asks for after a 429 when it sends no usable hint.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Seconds from a numeric `Retry-After`. HTTP-date values are not honored.
fn retry_after_secs(headers: &HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(retry_after_secs(resp.headers()), 120);
    }

    #[test]
    fn retry_after_non_numeric_uses_default() {
        let resp = mock_response_with_retry_after(429, "soon");
        assert_eq!(retry_after_secs(resp.headers()), DEFAULT_RETRY_AFTER_SECS);
    }

    #[tokio::test]
    async fn check_response_rate_limited_default() {
        let err = check_response(mock_response(429, "")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn check_response_api_error_keeps_body() {
        let err = check_response(mock_response(400, "validation_error"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, StoreError::Api { status: 400, ref message } if message == "validation_error")
        );
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[tokio::test]
    async fn malformed_envelope_is_parse_error() {
        let err = read_envelope(mock_response(200, "<html>")).await.err().unwrap();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[tokio::test]
    async fn envelope_reads_cursor() {
        let body = r#"{"results": [], "has_more": true, "next_cursor": "c-2"}"#;
        let envelope = read_envelope(mock_response(200, body)).await.unwrap_or_else(|_| {
            panic!("envelope should parse")
        });
        assert!(envelope.has_more);
        assert_eq!(envelope.next_cursor.as_deref(), Some("c-2"));
    }

    #[tokio::test]
    async fn pages_are_followed_until_store_reports_the_last() {
        let mut pages = [
            r#"{"results": [{"id": "a"}], "has_more": true, "next_cursor": "c-2"}"#,
            r#"{"results": [{"id": "b"}], "has_more": false, "next_cursor": null}"#,
        ]
        .into_iter();
        let mut cursors = Vec::new();
        let results = collect_pages(|cursor| {
            cursors.push(cursor);
            let body = pages.next().unwrap();
            async move { read_envelope(mock_response(200, body)).await }
        })
        .await
        .unwrap();

        let records: Vec<RawRecord> = parse_entries(results, "record");
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(cursors, vec![None, Some("c-2".to_string())]);
    }

    #[tokio::test]
    async fn cursor_without_has_more_ends_pagination() {
        let mut calls = 0;
        let results = collect_pages(|_| {
            calls += 1;
            let body = r#"{"results": [{"id": "a"}], "has_more": false, "next_cursor": "c-2"}"#;
            async move { read_envelope(mock_response(200, body)).await }
        })
        .await
        .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn repeated_cursor_is_an_error() {
        let mut calls = 0;
        let err = collect_pages(|_| {
            calls += 1;
            let body = r#"{"results": [{"id": "a"}], "has_more": true, "next_cursor": "c-1"}"#;
            async move { read_envelope(mock_response(200, body)).await }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::RepeatedCursor { ref cursor } if cursor == "c-1"));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn failing_later_page_fails_the_listing() {
        let mut pages = [
            (200, r#"{"results": [{"id": "a"}], "has_more": true, "next_cursor": "c-2"}"#),
            (500, "internal"),
        ]
        .into_iter();
        let err = collect_pages(|_| {
            let (status, body) = pages.next().unwrap();
            async move { read_envelope(check_response(mock_response(status, body)).await?).await }
        })
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::Api { status: 500, .. }));
    }

    #[test]
    fn parse_entries_skips_entries_without_id() {
        let records: Vec<RawRecord> = parse_entries(
            vec![
                json!({"id": "a", "properties": {}}),
                json!({"properties": {}}),
                json!("garbage"),
                json!({"id": "b"}),
            ],
            "record",
        );
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn client_rejects_unencodable_token() {
        let config = StoreConfig {
            token: "bad\ntoken".into(),
            ..StoreConfig::default()
        };
        let err = HttpContentStore::new(&config).err().unwrap();
        assert!(matches!(
            err,
            StoreError::InvalidHeader {
                header: "authorization"
            }
        ));
    }

    #[test]
    fn client_trims_trailing_slash() {
        let config = StoreConfig {
            api_base_url: "https://store.example.com/v1/".into(),
            token: "secret".into(),
            ..StoreConfig::default()
        };
        let store = HttpContentStore::new(&config).unwrap();
        assert_eq!(store.base_url, "https://store.example.com/v1");
    }
}
