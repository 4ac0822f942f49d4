use async_trait::async_trait;
use reqwest::{Request, Response};

/// Sends a dataset request built by [`super::fetch_bytes`].
///
/// [`super::BasicClient`] is the production implementation; tests can stand
/// in a client that never touches the network.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
