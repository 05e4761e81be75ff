//! Alvys API abstraction
//!
//! The pipeline talks to the API through [`AlvysApi`] so that the HTTP
//! client can be replaced by an in-memory fake in tests.

use crate::adapters::credentials::TenantCredentials;
use crate::config::{secret_string, SecretString};
use crate::domain::{AlvysError, ApiError, EntityKind, RawRecord, Result};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{Map, Value};

/// Bearer token returned by the token endpoint
#[derive(Debug, Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(secret_string(token))
    }

    /// `Authorization` header value
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret().as_ref())
    }
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub items: Vec<RawRecord>,
    /// Server-reported total across all pages, when present
    pub total: Option<u64>,
}

impl SearchPage {
    /// Extracts items and total from a search response body
    ///
    /// Items come from `Items` when it is a non-empty array, otherwise from
    /// `items`. Missing lists yield an empty page. The total is read from
    /// a numeric `Total` or `total`.
    ///
    /// # Errors
    ///
    /// Fails when the body is not a JSON object or a listed item is not an
    /// object.
    pub fn from_response(body: Value) -> Result<Self> {
        let Value::Object(mut body) = body else {
            return Err(ApiError::InvalidResponse(
                "Search response is not a JSON object".to_string(),
            )
            .into());
        };

        let total = ["Total", "total"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_u64));

        let items = match take_array(&mut body, "Items") {
            Some(items) if !items.is_empty() => items,
            _ => take_array(&mut body, "items").unwrap_or_default(),
        };

        let items = items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                other => Err(AlvysError::from(ApiError::InvalidResponse(format!(
                    "Search item is not an object: {other}"
                )))),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { items, total })
    }
}

fn take_array(body: &mut Map<String, Value>, key: &str) -> Option<Vec<Value>> {
    match body.remove(key) {
        Some(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// Operations the pipeline needs from the Alvys API
#[async_trait]
pub trait AlvysApi: Send + Sync {
    /// Exchanges client credentials for an access token
    async fn acquire_token(&self, credentials: &TenantCredentials) -> Result<AccessToken>;

    /// Calls `POST <base>/<entity>/search` with `payload`
    async fn search(
        &self,
        entity: EntityKind,
        token: &AccessToken,
        payload: &Map<String, Value>,
    ) -> Result<SearchPage>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_items_preferred_over_lowercase() {
        let page = SearchPage::from_response(json!({
            "Items": [{"Id": "a"}],
            "items": [{"Id": "b"}, {"Id": "c"}]
        }))
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0]["Id"], json!("a"));
    }

    #[test]
    fn test_empty_items_falls_back_to_lowercase() {
        let page = SearchPage::from_response(json!({
            "Items": [],
            "items": [{"Id": "b"}],
            "total": 1
        }))
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, Some(1));
    }

    #[test]
    fn test_missing_lists_yield_empty_page() {
        let page = SearchPage::from_response(json!({"Total": 0})).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, Some(0));
    }

    #[test]
    fn test_non_object_body_is_invalid() {
        let err = SearchPage::from_response(json!([1, 2])).unwrap_err();
        assert!(matches!(err, AlvysError::Api(ApiError::InvalidResponse(_))));

        let err = SearchPage::from_response(json!({"Items": [1]})).unwrap_err();
        assert!(matches!(err, AlvysError::Api(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_bearer_header() {
        let token = AccessToken::new("abc".to_string());
        assert_eq!(token.bearer(), "Bearer abc");
        assert!(!format!("{token:?}").contains("abc"));
    }
}
