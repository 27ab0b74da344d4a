use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use textlift_core::{ExtractedText, OcrBackend, OcrError, OcrResponse, SelectedFile};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/ocr";
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Uploads files to a fixed OCR endpoint. No retries and no timeout.
#[derive(Debug, Clone)]
pub struct HttpOcrBackend {
    client: reqwest::Client,
    endpoint: String,
    field_name: String,
}

impl HttpOcrBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
        }
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form_for(&self, file: &SelectedFile) -> Form {
        let part = Part::bytes(file.data.to_vec()).file_name(file.name.clone());
        let part = match part.mime_str(&file.mime_type) {
            Ok(part) => part,
            Err(e) => {
                debug!(mime = %file.mime_type, error = %e, "Unusable MIME hint; sending without content type");
                Part::bytes(file.data.to_vec()).file_name(file.name.clone())
            }
        };
        Form::new().part(self.field_name.clone(), part)
    }
}

impl Default for HttpOcrBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[async_trait]
impl OcrBackend for HttpOcrBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn recognize(&self, file: &SelectedFile) -> Result<ExtractedText, OcrError> {
        info!(endpoint = %self.endpoint, file = %file.name, bytes = file.len(), "[OCR] Uploading file");
        let resp = self
            .client
            .post(&self.endpoint)
            .multipart(self.form_for(file))
            .send()
            .await
            .map_err(|e| OcrError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OcrError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| OcrError::Transport(e.to_string()))?;
        let parsed: OcrResponse =
            serde_json::from_slice(&body).map_err(|e| OcrError::Decode(e.to_string()))?;
        debug!(fragments = parsed.text.tokens().len(), "[OCR] Response decoded");
        Ok(parsed.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Multipart,
        http::StatusCode,
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    /// Echoes back the field name, file name, content type and size it received.
    async fn echo(mut multipart: Multipart) -> Json<Value> {
        let mut text = Vec::new();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let len = field.bytes().await.unwrap().len();
            text.extend([name, file_name, content_type, len.to_string()]);
        }
        Json(json!({ "text": text }))
    }

    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/ocr", post(echo))
            .route(
                "/fail",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model crashed") }),
            )
            .route("/garbage", post(|| async { "not json" }))
            .route("/string", post(|| async { Json(json!({ "text": "Hello World" })) }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn sample() -> SelectedFile {
        SelectedFile::new("receipt.png", "image/png", vec![7u8; 42])
    }

    #[tokio::test]
    async fn posts_file_under_fixed_field() {
        let base = spawn_server().await;
        let backend = HttpOcrBackend::new(format!("{base}/ocr"));

        let text = backend.recognize(&sample()).await.unwrap();
        assert_eq!(text.tokens(), ["file", "receipt.png", "image/png", "42"]);
    }

    #[tokio::test]
    async fn custom_field_name_is_used() {
        let base = spawn_server().await;
        let backend = HttpOcrBackend::new(format!("{base}/ocr")).with_field_name("upload");

        let text = backend.recognize(&sample()).await.unwrap();
        assert_eq!(text.tokens()[0], "upload");
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let base = spawn_server().await;
        let backend = HttpOcrBackend::new(format!("{base}/fail"));

        match backend.recognize(&sample()).await {
            Err(OcrError::Http { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "model crashed");
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_decode_error() {
        let base = spawn_server().await;
        let backend = HttpOcrBackend::new(format!("{base}/garbage"));
        assert!(matches!(backend.recognize(&sample()).await, Err(OcrError::Decode(_))));
    }

    #[tokio::test]
    async fn bare_string_text_is_rejected() {
        let base = spawn_server().await;
        let backend = HttpOcrBackend::new(format!("{base}/string"));
        assert!(matches!(backend.recognize(&sample()).await, Err(OcrError::Decode(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpOcrBackend::new(format!("http://{addr}/ocr"));
        assert!(matches!(backend.recognize(&sample()).await, Err(OcrError::Transport(_))));
    }

    #[test]
    fn default_points_at_local_service() {
        assert_eq!(HttpOcrBackend::default().endpoint(), "http://127.0.0.1:8000/ocr");
    }
}
