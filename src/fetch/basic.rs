use super::client::HttpClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Sent with every dataset download so hosts can identify the dashboard.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// `reqwest` client configured for pulling the daily CSV.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("bikeshare_dashboard/"));
        assert!(USER_AGENT.len() > "bikeshare_dashboard/".len());
    }

    #[test]
    fn test_new_builds_client() {
        assert!(BasicClient::new().is_ok());
    }
}
