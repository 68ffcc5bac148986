//! Thin helpers over reqwest shared by the pipeline stages

use tracing::{debug, warn};

use crate::config::USER_AGENT;
use crate::retrieval::error::RetrievalError;

/// Creates the HTTP client used by every stage
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Issues a GET and fails on any non-success status
pub async fn get_success(
    client: &reqwest::Client,
    url: &str,
) -> Result<reqwest::Response, RetrievalError> {
    debug!("GET {}", url);
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!("{} returned status {}", url, status);
        return Err(RetrievalError::unexpected_status(url, status));
    }

    Ok(response)
}

/// Downloads the full body of `url`
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, RetrievalError> {
    let response = get_success(client, url).await?;
    Ok(response.bytes().await?.to_vec())
}

/// Downloads the body of `url` as text
pub async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, RetrievalError> {
    let response = get_success(client, url).await?;
    Ok(response.text().await?)
}
