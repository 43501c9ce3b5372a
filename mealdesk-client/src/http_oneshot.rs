// mealdesk-client/src/http_oneshot.rs
// Oneshot HTTP transport - in-memory calls
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::error::status_error;
use crate::http::{FileUpload, HttpClient};
use crate::{ClientError, ClientResult};

const MULTIPART_BOUNDARY: &str = "mealdesk-oneshot-boundary";

/// Oneshot HTTP client (in-memory calls)
///
/// Uses the Tower `oneshot` call to drive a Router directly, with no socket in
/// between. Used by integration tests against the mock backend.
///
/// # Example
///
/// ```ignore
/// let client = OneshotHttpClient::new(mealdesk_mock::router(MockBackend::seeded()));
/// let users: serde_json::Value = client.get("/api/admin/users").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    token: Option<String>,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - a Router with its state already attached
    pub fn new(router: Router) -> Self {
        Self {
            router,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = &self.token {
            builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(http::header::CONTENT_TYPE, content_type);
        }
        builder
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    fn json_request<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Request<Body>> {
        let bytes = serde_json::to_vec(body)?;
        self.build_request(method, path, Some("application/json"), Body::from(bytes))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        tracing::debug!(method = %request.method(), uri = %request.uri(), "in-process request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body_bytes).to_string();
            return Err(status_error(status.as_u16(), text));
        }

        serde_json::from_slice(&body_bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
    }
}

/// Encode a single-file multipart/form-data body
fn multipart_body(file: &FileUpload) -> Vec<u8> {
    let mut body = Vec::with_capacity(file.bytes.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file.file_name.replace('"', "")
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.content_type).as_bytes());
    body.extend_from_slice(&file.bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(Method::POST, path, body)?;
        self.execute(request).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::POST, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(Method::PUT, path, body)?;
        self.execute(request).await
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.json_request(Method::PATCH, path, body)?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::DELETE, path, None, Body::empty())?;
        self.execute(request).await
    }

    async fn upload<T: DeserializeOwned>(&self, path: &str, file: FileUpload) -> ClientResult<T> {
        let content_type = format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY);
        let body = multipart_body(&file);
        let request =
            self.build_request(Method::POST, path, Some(&content_type), Body::from(body))?;
        self.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipart_body_layout() {
        let file = FileUpload::new("a.csv", b"name,unit\n".to_vec());
        let body = String::from_utf8(multipart_body(&file)).unwrap();
        assert!(body.starts_with("--mealdesk-oneshot-boundary\r\n"));
        assert!(body.contains("name=\"file\"; filename=\"a.csv\""));
        assert!(body.contains("Content-Type: text/csv\r\n\r\nname,unit\n"));
        assert!(body.ends_with("\r\n--mealdesk-oneshot-boundary--\r\n"));
    }
}
