//! HTTP client for the Alvys public API

use super::traits::{AccessToken, AlvysApi, SearchPage};
use crate::adapters::credentials::TenantCredentials;
use crate::config::ApiConfig;
use crate::domain::{AlvysError, ApiError, EntityKind, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the token and search endpoints
///
/// # Example
///
/// ```no_run
/// use alvys_etl::adapters::alvys::{AlvysApi, AlvysClient};
/// use alvys_etl::adapters::credentials::TenantCredentials;
/// use alvys_etl::config::{secret_string, ApiConfig};
/// use alvys_etl::domain::EntityKind;
///
/// # async fn example() -> alvys_etl::domain::Result<()> {
/// let client = AlvysClient::new(&ApiConfig::default())?;
/// let creds = TenantCredentials {
///     tenant_id: "tenant".to_string(),
///     client_id: "client".to_string(),
///     client_secret: secret_string("secret".to_string()),
///     grant_type: "client_credentials".to_string(),
/// };
/// let token = client.acquire_token(&creds).await?;
/// let page = client.search(EntityKind::Drivers, &token, &Default::default()).await?;
/// println!("{} drivers", page.items.len());
/// # Ok(())
/// # }
/// ```
pub struct AlvysClient {
    client: Client,
    config: ApiConfig,
}

impl AlvysClient {
    /// Build the client from API configuration
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AlvysError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// `POST` target for an entity's search endpoint
    pub fn search_url(&self, entity: EntityKind) -> String {
        format!(
            "{}/{}/search",
            self.config.versioned_base_url(),
            entity.as_str()
        )
    }
}

#[async_trait]
impl AlvysApi for AlvysClient {
    async fn acquire_token(&self, credentials: &TenantCredentials) -> Result<AccessToken> {
        let token_url = self.config.token_url(&credentials.tenant_id);

        tracing::debug!(
            token_url = %token_url,
            client_id = %credentials.client_id,
            grant_type = %credentials.grant_type,
            "Requesting access token"
        );

        let request = TokenRequest {
            client_id: &credentials.client_id,
            client_secret: credentials.client_secret.expose_secret().as_ref(),
            grant_type: &credentials.grant_type,
        };

        let response = self
            .client
            .post(&token_url)
            .form(&request)
            .send()
            .await
            .map_err(|e| {
                ApiError::ConnectionFailed(format!("Failed to request access token: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ApiError::AuthenticationFailed(format!(
                "Token request failed with status {status}: {error_text}"
            ))
            .into());
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {e}"))
        })?;

        tracing::info!(tenant_id = %credentials.tenant_id, "Access token acquired");
        Ok(AccessToken::new(token.access_token))
    }

    async fn search(
        &self,
        entity: EntityKind,
        token: &AccessToken,
        payload: &Map<String, Value>,
    ) -> Result<SearchPage> {
        let url = self.search_url(entity);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, token.bearer())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/*+json")
            .body(serde_json::to_vec(payload)?)
            .send()
            .await
            .map_err(|e| ApiError::ConnectionFailed(format!("POST {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::RequestFailed {
                url,
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let body: Value = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse search response from {url}: {e}"))
        })?;

        SearchPage::from_response(body)
    }
}
