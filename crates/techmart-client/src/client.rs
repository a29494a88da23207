//! The shared API client every service borrows.

use crate::services::{
    AttributeService, CartService, CategoryService, OrderService, PaymentService,
    ProductService, ReviewService,
};
use crate::{
    FetchError, Method, MockTransport, RequestBuilder, ReqwestTransport, Response, Transport,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// HTTP client bound to one backend.
///
/// Cloning is cheap: the transport is shared.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    default_headers: HashMap<String, String>,
    token: Option<String>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8080/api`)
    /// sending through `reqwest`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client over any transport.
    pub fn with_transport(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Content-Type".to_string(), "application/json".to_string());
        default_headers.insert("X-Requested-With".to_string(), "XMLHttpRequest".to_string());

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_headers,
            token: None,
            transport,
        }
    }

    /// Client over a fresh [`MockTransport`], returned alongside it.
    pub fn mock(base_url: impl Into<String>) -> (Self, Arc<MockTransport>) {
        let mock = Arc::new(MockTransport::new());
        let client = Self::with_transport(base_url, mock.clone());
        (client, mock)
    }

    /// Send `Authorization: Bearer {token}` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = if token.is_empty() { None } else { Some(token) };
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a GET request.
    pub fn get(&self, path: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::Get, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::Post, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::Put, path)
    }

    /// Create a PATCH request.
    pub fn patch(&self, path: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::Patch, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: impl AsRef<str>) -> RequestBuilder {
        self.request(Method::Delete, path)
    }

    /// Create a request for a path relative to the base URL. Absolute URLs
    /// are used as-is.
    pub fn request(&self, method: Method, path: impl AsRef<str>) -> RequestBuilder {
        let path = path.as_ref();
        let url = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        };

        let mut builder = RequestBuilder::new(method, url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request; non-2xx statuses become [`FetchError::Http`].
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let method = request.method();
        let url = request.url().to_string();
        let response = self.transport.send(request).await.map_err(|e| {
            debug!(method = method.as_str(), %url, error = %e, "request failed");
            e
        })?;
        debug!(method = method.as_str(), %url, status = response.status, "backend request");
        response.error_for_status()
    }

    /// Send and decode a JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, FetchError> {
        self.send(request).await?.json()
    }

    /// Send and return the body as text.
    pub async fn fetch_text(&self, request: RequestBuilder) -> Result<String, FetchError> {
        self.send(request).await?.text()
    }

    /// Send and ignore the body.
    pub async fn execute(&self, request: RequestBuilder) -> Result<(), FetchError> {
        self.send(request).await.map(|_| ())
    }

    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(self)
    }

    pub fn categories(&self) -> CategoryService<'_> {
        CategoryService::new(self)
    }

    pub fn cart(&self) -> CartService<'_> {
        CartService::new(self)
    }

    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(self)
    }

    pub fn payments(&self) -> PaymentService<'_> {
        PaymentService::new(self)
    }

    pub fn reviews(&self) -> ReviewService<'_> {
        ReviewService::new(self)
    }

    pub fn attributes(&self) -> AttributeService<'_> {
        AttributeService::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_joins_base_url() {
        let client = ApiClient::new("http://localhost:8080/api/");
        let req = client.get("/products/1");
        assert_eq!(req.url(), "http://localhost:8080/api/products/1");
        let abs = client.get("https://cdn.example.com/x");
        assert_eq!(abs.url(), "https://cdn.example.com/x");
    }

    #[test]
    fn test_default_headers_and_token() {
        let client = ApiClient::new("http://h/api").with_token("abc");
        let req = client.get("products");
        assert_eq!(req.header_value("X-Requested-With"), Some("XMLHttpRequest"));
        assert_eq!(req.header_value("Content-Type"), Some("application/json"));
        assert_eq!(req.header_value("Authorization"), Some("Bearer abc"));

        let anonymous = ApiClient::new("http://h/api").with_token("");
        assert_eq!(anonymous.get("x").header_value("Authorization"), None);
    }

    #[tokio::test]
    async fn test_send_maps_status_to_error() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond(Method::Get, "/api/products/9", 500, "boom");

        let err = client.send(client.get("products/9")).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_validation());
    }

    #[tokio::test]
    async fn test_fetch_text() {
        let (client, mock) = ApiClient::mock("http://mock/api");
        mock.respond(Method::Get, "/api/ping", 200, "pong");
        assert_eq!(client.fetch_text(client.get("ping")).await.unwrap(), "pong");
    }
}
