//! Client side of the external library REST API.
//!
//! All endpoints answer with a `{ success, message, ... }` envelope. List
//! endpoints add `data` and `pagination`; detail endpoints add a named field
//! such as `post`, `stats` or `settings`.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::page::{PageResult, PaginationMeta};

pub mod errors;

pub use errors::{ApiError, ApiResult};

/// Calls against one REST backend.
///
/// Implementations return the decoded JSON body of any 2xx answer; envelope
/// checks happen in [`ensure_success`] and the `decode_*` helpers.
#[allow(async_fn_in_trait)]
pub trait LibraryApi {
    async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value>;
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value>;
}

/// `reqwest` backed API client bound to a base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, path: &str, request: reqwest::RequestBuilder) -> ApiResult<Value> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| {
                log::error!("API call to {path} failed: {err}");
                ApiError::from(err)
            })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;

        interpret_response(status, &body).inspect_err(|err| {
            log::error!("API call to {path} returned an error: {err}");
        })
    }
}

impl LibraryApi for ApiClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        log::debug!("GET {path} {query:?}");
        let request = self.http.get(self.url(path)).query(query);
        self.execute(path, request).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> ApiResult<Value> {
        log::debug!("{method} {path}");
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }
        self.execute(path, request).await
    }
}

/// The two backends the console talks to.
///
/// The blog API may be hosted separately from the main library API.
#[derive(Clone, Debug)]
pub struct Backends {
    pub library: ApiClient,
    pub blog: ApiClient,
}

impl Backends {
    pub fn new(library_url: &str, blog_url: &str, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            library: ApiClient::new(library_url, timeout)?,
            blog: ApiClient::new(blog_url, timeout)?,
        })
    }
}

/// Maps an HTTP status and raw body onto the envelope or an [`ApiError`].
pub fn interpret_response(status: u16, body: &[u8]) -> ApiResult<Value> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| value.get("message").and_then(Value::as_str).map(String::from))
            .unwrap_or_else(|| format!("HTTP error! status: {status}"));
        return Err(ApiError::Http { status, message });
    }

    if status == 204 || body.is_empty() {
        return Ok(json!({ "success": true, "message": "Operation successful." }));
    }

    Ok(serde_json::from_slice(body)?)
}

fn envelope_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(String::from)
}

/// Turns `{ success: false, message }` into [`ApiError::Rejected`].
pub fn ensure_success(value: Value) -> ApiResult<Value> {
    if value.get("success").and_then(Value::as_bool) == Some(true) {
        Ok(value)
    } else {
        let message = envelope_message(&value).unwrap_or_else(|| "Unknown error".to_string());
        Err(ApiError::Rejected(message))
    }
}

#[derive(Deserialize)]
struct PageEnvelope<T> {
    #[serde(alias = "results", alias = "users")]
    data: Option<Vec<T>>,
    pagination: Option<PaginationMeta>,
}

/// Decodes a list envelope into a [`PageResult`].
///
/// Endpoints that return everything at once (no `pagination`) are treated as a
/// single page.
pub fn decode_page<T: DeserializeOwned>(value: Value) -> ApiResult<PageResult<T>> {
    let value = ensure_success(value)?;
    let envelope: PageEnvelope<T> = serde_json::from_value(value)?;

    let items = envelope
        .data
        .ok_or_else(|| ApiError::Decode("list data is missing".to_string()))?;
    let pagination = envelope
        .pagination
        .map(PaginationMeta::normalized)
        .unwrap_or_else(|| PaginationMeta::single_page(items.len()));

    Ok(PageResult { items, pagination })
}

/// Decodes the named payload field of a successful envelope.
pub fn decode_field<T: DeserializeOwned>(value: Value, field: &str) -> ApiResult<T> {
    let mut value = ensure_success(value)?;
    let payload = value
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("`{field}` is missing")))?;
    Ok(serde_json::from_value(payload)?)
}

/// Returns the confirmation message of a successful mutation.
pub fn decode_message(value: Value, fallback: &str) -> ApiResult<String> {
    let value = ensure_success(value)?;
    Ok(envelope_message(&value).unwrap_or_else(|| fallback.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::Book;

    #[test]
    fn no_content_is_success() {
        let value = interpret_response(204, b"").expect("204 is success");
        assert_eq!(value["success"], json!(true));
    }

    #[test]
    fn error_status_uses_body_message() {
        let err = interpret_response(400, br#"{"success":false,"message":"ISBN exists"}"#)
            .expect_err("400 is an error");
        assert!(matches!(err, ApiError::Http { status: 400, .. }));
        assert_eq!(err.to_string(), "ISBN exists");
    }

    #[test]
    fn error_status_without_json_falls_back() {
        let err = interpret_response(502, b"<html>Bad gateway</html>").expect_err("502");
        assert_eq!(err.to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn business_failure_is_rejected() {
        let err = ensure_success(json!({ "success": false, "message": "DB error" }))
            .expect_err("rejected");
        assert!(matches!(err, ApiError::Rejected(ref message) if message == "DB error"));
    }

    #[test]
    fn page_without_pagination_is_single_page() {
        let page: PageResult<Book> = decode_page(json!({
            "success": true,
            "results": [{ "isbn": "1", "title": "Dune" }, { "isbn": "2", "title": "Emma" }]
        }))
        .expect("valid page");

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination.total_pages, 1);
        assert_eq!(page.pagination.total_items, 2);
    }

    #[test]
    fn page_with_aliased_list_key_keeps_items() {
        let page: PageResult<Book> = decode_page(json!({
            "success": true,
            "users": [{ "isbn": "1", "title": "Dune" }],
            "pagination": { "currentPage": 1, "totalPages": 1, "totalItems": 1 }
        }))
        .expect("valid page");

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Dune");
    }

    #[test]
    fn page_without_list_is_decode_error() {
        let err = decode_page::<Book>(json!({ "success": true, "message": "ok" }))
            .expect_err("missing list");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn decode_field_extracts_payload() {
        let stats: crate::domain::settings::DashboardStats = decode_field(
            json!({ "success": true, "stats": { "totalBooks": 12 } }),
            "stats",
        )
        .expect("valid stats");
        assert_eq!(stats.total_books, Some(12));
        assert_eq!(stats.total_users, None);
    }
}
