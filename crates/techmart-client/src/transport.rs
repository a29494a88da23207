//! Transports: the one place a request actually leaves the process.

use crate::{FetchError, Method, RequestBuilder, Response};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Sends a built request and reads the whole response.
///
/// Non-2xx statuses are returned as responses, not errors; status handling
/// belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = request.resolved_url()?;
        let mut builder = self.client.request(request.method.into(), url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, body))
    }
}

/// A request as seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl RecordedRequest {
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone)]
struct MockRoute {
    method: Method,
    path: String,
    status: u16,
    body: Vec<u8>,
}

/// In-memory transport answering from canned routes.
///
/// Routes match on method and URL path; query strings are recorded but not
/// matched. An unmatched request gets a 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Mutex<Vec<MockRoute>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a status and raw body.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: impl Into<Vec<u8>>) {
        let route = MockRoute {
            method,
            path: path.to_string(),
            status,
            body: body.into(),
        };
        self.routes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route);
    }

    /// Answer `method path` with 200 and a JSON body.
    pub fn respond_json(&self, method: Method, path: &str, body: serde_json::Value) {
        self.respond(method, path, 200, body.to_string());
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// How many requests hit `path`, by method.
    pub fn hits(&self) -> HashMap<(Method, String), usize> {
        let mut hits = HashMap::new();
        for req in self.requests() {
            *hits.entry((req.method, req.path)).or_insert(0) += 1;
        }
        hits
    }

    pub fn hit_count(&self, method: Method, path: &str) -> usize {
        self.hits()
            .get(&(method, path.to_string()))
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = request.resolved_url()?;
        let path = url.path().to_string();
        let body = request
            .body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok());

        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(RecordedRequest {
                method: request.method,
                path: path.clone(),
                query: request.query.clone(),
                body,
            });

        let routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        let response = routes
            .iter()
            .find(|r| r.method == request.method && r.path == path)
            .map(|r| Response::new(r.status, r.body.clone()))
            .unwrap_or_else(|| Response::new(404, "Not Found"));
        Ok(response)
    }
}
