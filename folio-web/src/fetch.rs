//! `HttpClient` over the browser Fetch API.

use folio::publications::{HttpClient, HttpResponse};
use folio::FetchError;
use gloo_net::http::{Request, RequestBuilder};

#[derive(Clone, Copy, Debug, Default)]
pub struct WebHttpClient;

fn network(e: gloo_net::Error) -> FetchError {
    FetchError::Network(e.to_string())
}

impl WebHttpClient {
    /// Send and read the whole body. Failing to read the body is a network
    /// failure, whatever the status.
    async fn send(&self, request: RequestBuilder) -> Result<HttpResponse, FetchError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(network)?;
        let body = response.text().await.map_err(network)?;
        Ok(HttpResponse::new(response.status(), response.status_text(), body))
    }
}

impl HttpClient for WebHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.send(Request::get(url)).await
    }

    async fn post(&self, url: &str) -> Result<HttpResponse, FetchError> {
        self.send(Request::post(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_read_failure_is_network_error() {
        let err = network(gloo_net::Error::GlooError("body stream aborted".into()));
        assert_eq!(err, FetchError::Network("body stream aborted".into()));
    }
}
