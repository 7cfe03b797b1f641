//! Google Secret Manager secret source
//!
//! Remote mode: each lookup reads the `latest` version of the secret over the
//! Secret Manager REST API. Every call is a fresh round trip; callers resolve
//! secrets once at startup.

use crate::{
    config::app_config::SecretManagerConfig,
    domain::secrets::{secret_version_path, SecretSource, SECRET_PROJECT_ID},
    shared::error::{AppError, AppResult, ConfigurationError},
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use tracing::debug;

const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";
const METADATA_TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

/// Where the OAuth bearer token for Secret Manager comes from
#[derive(Clone)]
pub enum AccessToken {
    /// A token supplied up front, e.g. from `gcloud auth print-access-token`
    Static(String),
    /// The service account token served by the instance metadata server
    MetadataServer { url: String },
}

impl AccessToken {
    /// `GOOGLE_OAUTH_ACCESS_TOKEN` when set, otherwise the metadata server
    /// (honouring `GCE_METADATA_HOST`)
    pub fn from_env() -> Self {
        if let Some(token) = env::var("GOOGLE_OAUTH_ACCESS_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            return AccessToken::Static(token);
        }

        let host = env::var("GCE_METADATA_HOST")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_METADATA_HOST.to_string());

        AccessToken::MetadataServer {
            url: format!("http://{}{}", host, METADATA_TOKEN_PATH),
        }
    }

    async fn bearer(&self, client: &Client) -> Result<String, String> {
        let token = match self {
            AccessToken::Static(token) => token.clone(),
            AccessToken::MetadataServer { url } => {
                let response = client
                    .get(url)
                    .header("Metadata-Flavor", "Google")
                    .send()
                    .await
                    .map_err(|e| format!("metadata server request failed: {}", e))?;

                let status = response.status();
                if !status.is_success() {
                    let text = response.text().await.unwrap_or_default();
                    return Err(format!("metadata server returned {}: {}", status, text));
                }

                response
                    .json::<MetadataTokenResponse>()
                    .await
                    .map_err(|e| format!("invalid metadata token response: {}", e))?
                    .access_token
            }
        };
        Ok(format!("Bearer {}", token))
    }
}

/// Secret source backed by Google Secret Manager
pub struct GcpSecretManagerSource {
    client: Client,
    endpoint: String,
    project_id: String,
    token: AccessToken,
}

impl GcpSecretManagerSource {
    /// Create a source for an explicit endpoint, project and token
    pub fn new(client: Client, endpoint: impl Into<String>, project_id: impl Into<String>, token: AccessToken) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            token,
        }
    }

    /// Create the production source from runtime configuration
    pub fn from_config(config: &SecretManagerConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::new(
            client,
            config.endpoint.clone(),
            SECRET_PROJECT_ID,
            AccessToken::from_env(),
        ))
    }

    fn access_url(&self, secret_id: &str) -> String {
        format!(
            "{}/v1/{}:access",
            self.endpoint,
            secret_version_path(&self.project_id, secret_id)
        )
    }

    async fn access(&self, secret_id: &str) -> Result<String, String> {
        let bearer = self.token.bearer(&self.client).await?;
        let url = self.access_url(secret_id);
        debug!(url = %url, "Fetching secret version");

        let response = self
            .client
            .get(&url)
            .header("Authorization", bearer)
            .send()
            .await
            .map_err(|e| format!("http request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("access secret version failed: {} {}", status, text));
        }

        let parsed: AccessSecretVersionResponse = response
            .json()
            .await
            .map_err(|e| format!("failed to decode access response: {}", e))?;

        let data = parsed
            .payload
            .and_then(|payload| payload.data)
            .ok_or_else(|| "secret payload missing data".to_string())?;

        let bytes = STANDARD
            .decode(data)
            .map_err(|e| format!("base64 decode failed: {}", e))?;

        String::from_utf8(bytes).map_err(|e| format!("payload is not valid UTF-8: {}", e))
    }
}

#[async_trait]
impl SecretSource for GcpSecretManagerSource {
    async fn resolve(&self, secret_id: &str) -> Result<String, ConfigurationError> {
        self.access(secret_id)
            .await
            .map_err(|reason| ConfigurationError::access(secret_id, reason))
    }

    fn name(&self) -> &'static str {
        "gcp-secret-manager"
    }
}

#[derive(Deserialize)]
struct AccessSecretVersionResponse {
    #[serde(default)]
    payload: Option<SecretPayload>,
}

#[derive(Deserialize)]
struct SecretPayload {
    #[serde(default)]
    data: Option<String>,
}

#[derive(Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
}
