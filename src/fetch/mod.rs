//! HTTP retrieval for remotely hosted dataset files.

mod basic;
mod client;

pub use basic::{BasicClient, USER_AGENT};
pub use client::HttpClient;

use anyhow::{Context, Result};
use tracing::debug;

/// Issues a GET for `url` and returns the response body.
///
/// Non-success status codes are reported as errors rather than returning the
/// error page as data.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse().with_context(|| format!("Invalid URL '{}'", url))?,
    );

    let resp = client.execute(req).await?.error_for_status()?;
    debug!(status = %resp.status(), url, "Fetched");
    Ok(resp.bytes().await?.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        let client = BasicClient::new().unwrap();
        let err = fetch_bytes(&client, "not a url").await.unwrap_err();

        assert!(err.to_string().contains("Invalid URL"));
    }

    struct LoopbackClient;

    #[async_trait::async_trait]
    impl HttpClient for LoopbackClient {
        async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
            assert_eq!(req.method(), reqwest::Method::GET);
            assert_eq!(req.url().as_str(), "http://127.0.0.1:9/day_clean.csv");
            // port 9 (discard) is closed on test hosts, so this always errors
            reqwest::Client::new().execute(req).await
        }
    }

    #[tokio::test]
    async fn test_fetch_goes_through_client() {
        let err = fetch_bytes(&LoopbackClient, "http://127.0.0.1:9/day_clean.csv").await;
        assert!(err.is_err());
    }
}
