//! Catalog service HTTP client.
use reqwest::StatusCode;
use serde_json::json;
use tracing::debug;

use crate::types::ProductDraft;

/// A completed HTTP exchange: status plus raw body text.
///
/// Non-ok statuses are data rather than errors. Classifying them is the
/// calling dispatcher's business logic; only transport failures surface as
/// `reqwest::Error`.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn is_ok(&self) -> bool {
        self.status.is_success()
    }

    /// Renders the status as `<code> - <reason>`, e.g. `404 - Not Found`.
    pub fn status_line(&self) -> String {
        format!(
            "{} - {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("Unknown Status")
        )
    }
}

/// Client for the product-catalog demo service.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a new client. Trailing slashes on the base URL are trimmed.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read(response: reqwest::Response) -> Result<Reply, reqwest::Error> {
        let status = response.status();
        let body = response.text().await?;
        Ok(Reply { status, body })
    }

    /// Triggers one of the service's error simulations.
    pub async fn trigger_error(&self, kind: &str) -> Result<Reply, reqwest::Error> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/demo/errors/{}", kind)))
            .send()
            .await?;
        Self::read(response).await
    }

    /// Posts a payload that is intentionally missing the required field.
    pub async fn validation_error(&self) -> Result<Reply, reqwest::Error> {
        let response = self
            .http
            .post(self.endpoint("/api/demo/errors/validation-error"))
            .json(&json!({ "invalidField": "test" }))
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn list_products(&self) -> Result<Reply, reqwest::Error> {
        let response = self.http.get(self.endpoint("/api/products")).send().await?;
        Self::read(response).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Reply, reqwest::Error> {
        let response = self
            .http
            .get(self.endpoint(&format!("/api/products/{}", id)))
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn search_products(&self, query: &str) -> Result<Reply, reqwest::Error> {
        let response = self
            .http
            .get(self.endpoint("/api/products/search"))
            .query(&[("query", query)])
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Reply, reqwest::Error> {
        let response = self
            .http
            .post(self.endpoint("/api/products"))
            .json(draft)
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn purchase_product(&self, id: &str, quantity: &str) -> Result<Reply, reqwest::Error> {
        let response = self
            .http
            .post(self.endpoint(&format!("/api/products/{}/purchase", id)))
            .query(&[("quantity", quantity)])
            .send()
            .await?;
        Self::read(response).await
    }

    pub async fn bulk_import(&self, batch: &[ProductDraft]) -> Result<Reply, reqwest::Error> {
        let response = self
            .http
            .post(self.endpoint("/api/products/bulk-import"))
            .json(&batch)
            .send()
            .await?;
        Self::read(response).await
    }

    /// Fire-and-forget ping against the service root. The response body is
    /// discarded; only the transport outcome is reported.
    pub async fn ping(&self) -> Result<(), reqwest::Error> {
        let response = self.http.get(self.endpoint("/")).send().await?;
        debug!("Keep-alive ping returned {}", response.status());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.endpoint("/api/products"),
            "http://localhost:8080/api/products"
        );
    }

    #[test]
    fn status_line_includes_code_and_reason() {
        let reply = Reply {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert_eq!(reply.status_line(), "404 - Not Found");
        assert!(!reply.is_ok());
    }
}
