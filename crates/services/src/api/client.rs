use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use practice_core::model::AuthToken;

use crate::api::Endpoint;
use crate::config::ApiConfig;
use crate::error::FetchError;

/// Header carrying the host-issued init data.
pub const AUTH_HEADER: &str = "X-Auth-Init-Data";

/// Authenticated JSON client for the analytics service.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send a bodiless request and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` for local validation, transport, status, or decode failures.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        token: &AuthToken,
    ) -> Result<T, FetchError> {
        self.send(endpoint, token, None).await
    }

    /// Send a request with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` for local validation, transport, status, or decode failures.
    pub async fn request_with_body<T, B>(
        &self,
        endpoint: &Endpoint,
        token: &AuthToken,
        body: &B,
    ) -> Result<T, FetchError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(|err| {
            warn!(error = %err, "failed to encode request body");
            FetchError::InvalidRequest("request body is not valid JSON".into())
        })?;
        self.send(endpoint, token, Some(body)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        token: &AuthToken,
        body: Option<serde_json::Value>,
    ) -> Result<T, FetchError> {
        endpoint.validate()?;
        let method = endpoint.method();
        let url = endpoint.url(self.config.base_url())?;
        debug!(%method, path = url.path(), authenticated = !token.is_empty(), "api request");

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if !token.is_empty() {
            request = request.header(AUTH_HEADER, token.as_str());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|err| {
            warn!(%method, path = url.path(), error = %err, "api request failed to send");
            FetchError::Network
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(ErrorBody::into_detail);
            let err = FetchError::http(status.as_u16(), detail);
            warn!(%method, path = url.path(), status = status.as_u16(), error = %err, "api request rejected");
            return Err(err);
        }

        let bytes = response.bytes().await.map_err(|err| {
            warn!(%method, path = url.path(), error = %err, "failed to read response body");
            FetchError::Network
        })?;
        serde_json::from_slice(&bytes).map_err(|err| {
            warn!(%method, path = url.path(), error = %err, "failed to decode response body");
            FetchError::Parse
        })
    }
}

/// `{"detail": "..."}`; validation errors put a list there instead of a string.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_detail(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::String(text) if !text.trim().is_empty() => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_only_uses_string_details() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Word 'x' not found"}"#).unwrap();
        assert_eq!(body.into_detail().as_deref(), Some("Word 'x' not found"));

        let body: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","word"],"msg":"field required"}]}"#)
                .unwrap();
        assert_eq!(body.into_detail(), None);

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_detail(), None);
    }
}
