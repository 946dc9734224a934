//! Shared HTTP plumbing for the provider adapters

use concord_application::GatewayError;
use concord_domain::util::truncate_str;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

/// Longest error body echoed into a failure message
const ERROR_BODY_LIMIT: usize = 200;

pub(crate) const USER_AGENT: &str = concat!("concord/", env!("CARGO_PKG_VERSION"));

/// One client for every adapter, so connections are pooled.
pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(USER_AGENT).build()
}

/// Send a request and decode a JSON body.
///
/// Transport errors map to `ConnectionError`, non-2xx status codes to
/// `RequestFailed` and undecodable bodies to `InvalidResponse`.
pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, GatewayError> {
    let response = request.send().await.map_err(|e| {
        if e.is_connect() {
            GatewayError::ConnectionError(e.to_string())
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::RequestFailed(format!(
            "HTTP {}: {}",
            status,
            truncate_str(body.trim(), ERROR_BODY_LIMIT)
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}
