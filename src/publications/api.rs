//! Publications API client.
//!
//! [`HttpClient`] is the transport seam: `fetch` in the browser, a scripted
//! fake in tests. [`ScholarApi`] knows the endpoints and turns responses
//! into typed results.

use serde_json::Value;

use super::model::{CacheStatus, ScholarResponse};
use crate::error::FetchError;
use crate::time::Stopwatch;

/// A fully read HTTP response.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Best-effort error text for a failed response.
    ///
    /// Uses the body's `message` field when it is a non-empty string, then
    /// the status text, then the bare status code.
    pub fn error_message(&self) -> String {
        let from_body = serde_json::from_str::<Value>(&self.body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.trim().is_empty());
        match from_body {
            Some(message) => message,
            None if !self.status_text.trim().is_empty() => self.status_text.clone(),
            None => format!("HTTP {}", self.status),
        }
    }

    /// `Ok(self)` for 2xx, otherwise [`FetchError::HttpStatus`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::HttpStatus {
                status: self.status,
                message: self.error_message(),
            })
        }
    }
}

/// Minimal async HTTP transport.
///
/// Implementations return `Err(FetchError::Network)` only when no response
/// arrived; any status code, including errors, is an `Ok` response.
#[allow(async_fn_in_trait)]
pub trait HttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;

    async fn post(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

/// A decoded scholar payload plus the measured round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct Fetched {
    pub response: ScholarResponse,
    pub latency_ms: u64,
}

/// Endpoint-aware client for the publications backend.
#[derive(Clone, Debug)]
pub struct ScholarApi<C> {
    client: C,
    api_base: String,
    cache_status_url: String,
}

impl<C: HttpClient> ScholarApi<C> {
    pub fn new(client: C, api_base: &str, cache_status_url: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            cache_status_url: cache_status_url.to_string(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub fn scholar_url(&self) -> String {
        format!("{}/scholar-realtime", self.api_base)
    }

    pub fn clear_cache_url(&self) -> String {
        format!("{}/clear-cache", self.api_base)
    }

    /// `GET {api_base}/scholar-realtime`, exactly one request.
    pub async fn fetch_scholar(&self) -> Result<Fetched, FetchError> {
        let url = self.scholar_url();
        log::debug!("fetching publications from {}", url);
        let watch = Stopwatch::start();
        let response = self.client.get(&url).await?.error_for_status()?;
        let latency_ms = watch.elapsed_ms();
        let response = ScholarResponse::from_json(&response.body)?;
        log::info!(
            "publications loaded in {}ms ({})",
            latency_ms,
            response.source().label()
        );
        Ok(Fetched { response, latency_ms })
    }

    /// `POST {api_base}/clear-cache`.
    pub async fn clear_cache(&self) -> Result<(), FetchError> {
        self.client.post(&self.clear_cache_url()).await?.error_for_status()?;
        Ok(())
    }

    /// `GET /api/cache-status`.
    pub async fn cache_status(&self) -> Result<CacheStatus, FetchError> {
        let response = self.client.get(&self.cache_status_url).await?.error_for_status()?;
        serde_json::from_str(&response.body)
            .map_err(|e| FetchError::MalformedBody(format!("invalid cache status: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_body() {
        let resp = HttpResponse::new(500, "Internal Server Error", r#"{"message":"rate limited"}"#);
        assert_eq!(resp.error_message(), "rate limited");
    }

    #[test]
    fn test_error_message_falls_back() {
        let html = HttpResponse::new(502, "Bad Gateway", "<html>oops</html>");
        assert_eq!(html.error_message(), "Bad Gateway");

        let blank = HttpResponse::new(503, "", r#"{"message":"  "}"#);
        assert_eq!(blank.error_message(), "HTTP 503");
    }

    #[test]
    fn test_error_for_status() {
        assert!(HttpResponse::new(204, "No Content", "").error_for_status().is_ok());
        let err = HttpResponse::new(404, "Not Found", "").error_for_status().unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpStatus {
                status: 404,
                message: "Not Found".to_string()
            }
        );
    }
}
