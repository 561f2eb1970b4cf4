use crate::config::toml_config::ApiConfig;
use crate::core::CommunicationClient;
use crate::utils::error::{Result, UploadError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// `CommunicationClient` over the LMIS REST API.
///
/// Looks resources up with `GET {base_url}{path}?code=...`. Accepts a plain
/// JSON array, a paged search result (`{"content": [...]}`) or a single
/// object; 404 means the code is unknown.
#[derive(Debug, Clone)]
pub struct RestCommunicationClient {
    client: Client,
    base_url: Url,
    access_token: Option<String>,
    timeout: Option<Duration>,
}

impl RestCommunicationClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(&config.base_url)?,
            access_token: config.access_token.clone(),
            timeout: config.timeout_seconds.map(Duration::from_secs),
        })
    }

    /// Appends `resource_path` to the base URL's own path, so deployments under
    /// a context path (`https://host/openlmis`) keep it.
    fn resource_url(&self, resource_path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| UploadError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(resource_path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}

#[async_trait]
impl CommunicationClient for RestCommunicationClient {
    async fn find_by_code(
        &self,
        resource_path: &str,
        code: &str,
    ) -> Result<Option<serde_json::Value>> {
        let mut url = self.resource_url(resource_path)?;
        url.query_pairs_mut().append_pair("code", code);

        tracing::debug!("Making API request to: {}", url);
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(UploadError::ApiStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let json: serde_json::Value = serde_json::from_str(&body)?;
        Ok(first_match(json, code))
    }
}

/// First returned resource whose `code` equals `code` exactly. Servers may
/// match loosely, so other candidates are dropped.
fn first_match(json: serde_json::Value, code: &str) -> Option<serde_json::Value> {
    let candidates = match json {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => match obj.remove("content") {
            Some(serde_json::Value::Array(items)) => items,
            Some(other) => {
                obj.insert("content".to_string(), other);
                vec![serde_json::Value::Object(obj)]
            }
            None => vec![serde_json::Value::Object(obj)],
        },
        _ => Vec::new(),
    };

    candidates
        .into_iter()
        .find(|item| item.get("code").and_then(|c| c.as_str()) == Some(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_match_shapes() {
        assert_eq!(first_match(json!(null), "A"), None);
        assert_eq!(first_match(json!([]), "A"), None);
        assert_eq!(
            first_match(json!([{"code": "A", "id": 1}, {"code": "A", "id": 2}]), "A"),
            Some(json!({"code": "A", "id": 1}))
        );
        assert_eq!(first_match(json!({"content": [], "totalElements": 0}), "A"), None);
        assert_eq!(
            first_match(json!({"content": [{"code": "A"}], "totalElements": 1}), "A"),
            Some(json!({"code": "A"}))
        );
        assert_eq!(
            first_match(json!({"code": "A", "content": "text"}), "A"),
            Some(json!({"code": "A", "content": "text"}))
        );
    }

    #[test]
    fn test_first_match_requires_exact_code() {
        assert_eq!(first_match(json!([{"code": "HC010", "id": "x"}]), "HC01"), None);
        assert_eq!(
            first_match(json!([{"code": "HC010"}, {"code": "HC01", "id": "y"}]), "HC01"),
            Some(json!({"code": "HC01", "id": "y"}))
        );
        assert_eq!(first_match(json!({"code": "hc01"}), "HC01"), None);
        assert_eq!(first_match(json!([{"id": "no-code"}]), "HC01"), None);
        assert_eq!(first_match(json!("HC01"), "HC01"), None);
    }

    #[test]
    fn test_resource_url_joins_path() {
        let client = RestCommunicationClient::new(&ApiConfig {
            base_url: "https://lmis.example.org".to_string(),
            access_token: None,
            timeout_seconds: None,
        })
        .unwrap();

        assert_eq!(
            client.resource_url("/api/facilities").unwrap().as_str(),
            "https://lmis.example.org/api/facilities"
        );
    }

    #[test]
    fn test_resource_url_keeps_context_path() {
        for base_url in ["https://lmis.example.org/openlmis", "https://lmis.example.org/openlmis/"] {
            let client = RestCommunicationClient::new(&ApiConfig {
                base_url: base_url.to_string(),
                access_token: None,
                timeout_seconds: None,
            })
            .unwrap();

            assert_eq!(
                client.resource_url("/api/facilities").unwrap().as_str(),
                "https://lmis.example.org/openlmis/api/facilities"
            );
        }
    }
}
