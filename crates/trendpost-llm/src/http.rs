//! Shared request plumbing for the provider clients.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::LlmError;

/// Upper bound on how much of an error body is kept in [`LlmError::UnexpectedStatus`].
const ERROR_BODY_LIMIT: usize = 500;

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, LlmError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

/// POSTs `body` as JSON with bearer auth and parses a 2xx response.
pub(crate) async fn post_json<B, T>(
    client: &Client,
    service: &'static str,
    url: &str,
    api_key: &str,
    body: &B,
) -> Result<T, LlmError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let body: String = text.chars().take(ERROR_BODY_LIMIT).collect();
        return Err(LlmError::UnexpectedStatus {
            service,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str(&text).map_err(|e| LlmError::Deserialize {
        context: url.to_string(),
        source: e,
    })
}
