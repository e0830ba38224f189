//! Admin API client
//!
//! Direct HTTP client for calling the store's Admin GraphQL API.
//! The sync core only sees the `RemoteInventoryClient` trait; the concrete
//! `ShopifyAdminClient` is wired in by `main` and the `sync_file` binary.

use crate::config::ShopifyConfig;
use crate::shopify::error::TransportError;
use crate::shopify::graphql_types::{GraphqlRequest, GraphqlResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Header carrying the Admin API access token
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Capability to issue GraphQL operations against the remote store
///
/// Both methods return the `data` member of the GraphQL response. Session and
/// authentication are the implementor's concern.
#[async_trait]
pub trait RemoteInventoryClient: Send + Sync {
    /// Issue a read-only query
    async fn query(&self, document: &str, variables: Value) -> Result<Value, TransportError>;

    /// Issue a mutation
    async fn mutate(&self, document: &str, variables: Value) -> Result<Value, TransportError>;
}

/// reqwest-backed Admin GraphQL client
#[derive(Debug, Clone)]
pub struct ShopifyAdminClient {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl ShopifyAdminClient {
    /// Build a client for the configured store
    ///
    /// # Errors
    /// Returns `TransportError::Request` if the HTTP client cannot be built.
    pub fn new(config: &ShopifyConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let base_url = store_base_url(&config.store_domain);
        Ok(Self::with_base_url(
            client,
            &base_url,
            &config.api_version,
            &config.access_token,
        ))
    }

    /// Build a client against an explicit base URL (used by tests and proxies)
    pub fn with_base_url(
        client: reqwest::Client,
        base_url: &str,
        api_version: &str,
        access_token: &str,
    ) -> Self {
        Self {
            client,
            endpoint: graphql_endpoint(base_url, api_version),
            access_token: access_token.to_string(),
        }
    }

    /// Full URL of the GraphQL endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute(&self, document: &str, variables: &Value) -> Result<Value, TransportError> {
        let request_body = GraphqlRequest {
            query: document,
            variables,
        };

        tracing::debug!(endpoint = %self.endpoint, "Calling Admin GraphQL API");

        let response = self
            .client
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());

            tracing::error!(
                status_code = status_code,
                error_body = %error_body,
                "Admin API returned error status"
            );

            return Err(TransportError::Status {
                status: status_code,
                body: error_body,
            });
        }

        let response_body = response.text().await?;
        let parsed: GraphqlResponse = serde_json::from_str(&response_body).map_err(|e| {
            TransportError::MalformedResponse(format!(
                "invalid JSON ({}) - Response body: {}",
                e, response_body
            ))
        })?;

        if !parsed.errors.is_empty() {
            let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(TransportError::Graphql(messages.join(", ")));
        }

        parsed
            .data
            .filter(|data| !data.is_null())
            .ok_or_else(|| TransportError::MalformedResponse("response contains no data".to_string()))
    }
}

#[async_trait]
impl RemoteInventoryClient for ShopifyAdminClient {
    async fn query(&self, document: &str, variables: Value) -> Result<Value, TransportError> {
        self.execute(document, &variables).await
    }

    async fn mutate(&self, document: &str, variables: Value) -> Result<Value, TransportError> {
        self.execute(document, &variables).await
    }
}

/// Normalize a configured store domain into an `https://` base URL
fn store_base_url(store_domain: &str) -> String {
    let domain = store_domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    format!("https://{}", domain)
}

fn graphql_endpoint(base_url: &str, api_version: &str) -> String {
    format!(
        "{}/admin/api/{}/graphql.json",
        base_url.trim_end_matches('/'),
        api_version
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    const API_VERSION: &str = "2024-10";
    const GRAPHQL_PATH: &str = "/admin/api/2024-10/graphql.json";

    fn client_for(server: &Server) -> ShopifyAdminClient {
        ShopifyAdminClient::with_base_url(
            reqwest::Client::new(),
            &server.url(),
            API_VERSION,
            "test-token",
        )
    }

    #[test]
    fn test_store_base_url_normalizes_scheme_and_slash() {
        assert_eq!(
            store_base_url("demo.myshopify.com"),
            "https://demo.myshopify.com"
        );
        assert_eq!(
            store_base_url("https://demo.myshopify.com/"),
            "https://demo.myshopify.com"
        );
    }

    #[test]
    fn test_new_builds_admin_endpoint() {
        let config = ShopifyConfig {
            store_domain: "demo.myshopify.com".to_string(),
            access_token: "token".to_string(),
            api_version: API_VERSION.to_string(),
            timeout_secs: 5,
        };
        let client = ShopifyAdminClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://demo.myshopify.com/admin/api/2024-10/graphql.json"
        );
    }

    #[tokio::test]
    async fn test_query_success_returns_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GRAPHQL_PATH)
            .match_header(ACCESS_TOKEN_HEADER, "test-token")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "variables": { "query": "sku:\"20760\"" }
            })))
            .with_status(200)
            .with_body(r#"{"data": {"productVariants": {"nodes": []}}}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client
            .query("query { x }", json!({ "query": "sku:\"20760\"" }))
            .await;

        mock.assert_async().await;
        assert_eq!(result.unwrap(), json!({ "productVariants": { "nodes": [] } }));
    }

    #[tokio::test]
    async fn test_error_status_is_transport_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GRAPHQL_PATH)
            .with_status(401)
            .with_body(r#"{"errors": "[API] Invalid API key or access token"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.mutate("mutation { x }", json!({})).await;

        mock.assert_async().await;
        match result.unwrap_err() {
            TransportError::Status { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("Invalid API key"));
            }
            other => panic!("Expected Status error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_top_level_graphql_errors_are_joined() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GRAPHQL_PATH)
            .with_status(200)
            .with_body(r#"{"errors": [{"message": "Throttled"}, {"message": "Try later"}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.query("query { x }", json!({})).await;

        mock.assert_async().await;
        assert_eq!(
            result.unwrap_err(),
            TransportError::Graphql("Throttled, Try later".to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GRAPHQL_PATH)
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.query("query { x }", json!({})).await;

        mock.assert_async().await;
        let error_msg = result.unwrap_err().to_string();
        assert!(
            error_msg.contains("Malformed response"),
            "Error message should mention malformed response, got: {}",
            error_msg
        );
    }

    #[tokio::test]
    async fn test_missing_data_is_malformed_response() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GRAPHQL_PATH)
            .with_status(200)
            .with_body(r#"{"data": null}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let result = client.query("query { x }", json!({})).await;

        mock.assert_async().await;
        assert!(matches!(
            result.unwrap_err(),
            TransportError::MalformedResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = ShopifyAdminClient::with_base_url(
            reqwest::Client::new(),
            "http://127.0.0.1:9",
            API_VERSION,
            "test-token",
        );
        let result = client.query("query { x }", json!({})).await;
        assert!(matches!(result.unwrap_err(), TransportError::Request(_)));
    }
}
