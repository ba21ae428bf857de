//! HttpDiagnosisService - REST client for the remote analysis service.
//!
//! One POST per diagnosis, one GET for the startup probe. No retries: a
//! failed call is handed straight back so the pipeline can fall back.

use async_trait::async_trait;
use raed_core::config::RaedConfig;
use raed_core::diagnosis::{DiagnosisRequest, DiagnosisResponse, DiagnosisService, ProbeResponse};
use raed_core::error::{RaedError, Result};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client implementation that talks to the analysis service over HTTP.
#[derive(Clone)]
pub struct HttpDiagnosisService {
    client: Client,
    endpoint: String,
    request_timeout: Option<Duration>,
    probe_timeout: Duration,
}

impl HttpDiagnosisService {
    /// Creates a new client for `endpoint` with transport-default timeouts.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            request_timeout: None,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Builds a client from the loaded configuration.
    pub fn from_config(config: &RaedConfig) -> Self {
        let service = Self::new(config.endpoint.clone()).with_probe_timeout(config.probe_timeout());
        match config.request_timeout() {
            Some(timeout) => service.with_request_timeout(timeout),
            None => service,
        }
    }

    /// Bounds every diagnosis request.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Bounds the connectivity probe.
    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_request(&self, body: &DiagnosisRequest) -> Result<DiagnosisResponse> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(timeout) = self.request_timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .map_err(|err| RaedError::transport(format!("Diagnosis request failed: {err}")))?;

        let response = ensure_success(response).await?;

        response
            .json::<DiagnosisResponse>()
            .await
            .map_err(|err| RaedError::transport(format!("Failed to parse diagnosis response: {err}")))
    }
}

#[async_trait]
impl DiagnosisService for HttpDiagnosisService {
    async fn diagnose(&self, request: &DiagnosisRequest) -> Result<DiagnosisResponse> {
        tracing::debug!(category = %request.category, endpoint = %self.endpoint, "Sending diagnosis request");
        self.send_request(request).await
    }

    async fn probe(&self) -> Result<ProbeResponse> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("test", "1")])
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|err| RaedError::transport(format!("Connectivity probe failed: {err}")))?;

        let response = ensure_success(response).await?;

        response
            .json::<ProbeResponse>()
            .await
            .map_err(|err| RaedError::transport(format!("Failed to parse probe response: {err}")))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    Err(map_http_error(status, body_text))
}

fn map_http_error(status: StatusCode, body: String) -> RaedError {
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.error.or(parsed.message))
        .unwrap_or(body);

    RaedError::service(format!("Analysis service error ({status}): {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use raed_core::Category;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response, returning the raw request.
    async fn serve_once(status_line: &'static str, body: String) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/exec", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let raw = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            raw
        });

        (url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn sample_request() -> DiagnosisRequest {
        DiagnosisRequest {
            category: Category::Time,
            payload: json!({ "problem": "procrastination issue" }),
            submitted_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_diagnose_posts_request_and_parses_body() {
        let (url, server) = serve_once(
            "200 OK",
            json!({ "success": true, "diagnosis": "focus", "severity": "low" }).to_string(),
        )
        .await;

        let service = HttpDiagnosisService::new(url);
        let response = service.diagnose(&sample_request()).await.unwrap();

        assert!(response.success);
        assert_eq!(response.diagnosis, Some(json!("focus")));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /exec"));
        assert!(raw.contains("\"submittedAt\""));
        assert!(raw.contains("\"category\":\"time\""));
    }

    #[tokio::test]
    async fn test_http_error_status_is_service_error() {
        let (url, _server) = serve_once(
            "503 Service Unavailable",
            json!({ "error": "maintenance" }).to_string(),
        )
        .await;

        let err = HttpDiagnosisService::new(url)
            .diagnose(&sample_request())
            .await
            .unwrap_err();

        match err {
            RaedError::Service(message) => assert!(message.contains("maintenance")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_transport_error() {
        let (url, _server) = serve_once("200 OK", "<html>login</html>".to_string()).await;

        let err = HttpDiagnosisService::new(url)
            .diagnose(&sample_request())
            .await
            .unwrap_err();

        assert!(matches!(err, RaedError::Transport(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/exec", listener.local_addr().unwrap());
        drop(listener);

        let err = HttpDiagnosisService::new(url)
            .with_request_timeout(Duration::from_secs(2))
            .diagnose(&sample_request())
            .await
            .unwrap_err();

        assert!(err.is_remote_failure());
    }

    #[tokio::test]
    async fn test_probe_sends_test_query() {
        let (url, server) = serve_once(
            "200 OK",
            json!({ "success": true, "message": "pong" }).to_string(),
        )
        .await;

        let probe = HttpDiagnosisService::new(url).probe().await.unwrap();
        assert!(probe.success);
        assert_eq!(probe.message.as_deref(), Some("pong"));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /exec?test=1"));
    }

    #[test]
    fn test_from_config_carries_timeouts() {
        let config = RaedConfig {
            request_timeout_ms: Some(1200),
            probe_timeout_ms: 300,
            ..RaedConfig::default()
        };
        let service = HttpDiagnosisService::from_config(&config);
        assert_eq!(service.request_timeout, Some(Duration::from_millis(1200)));
        assert_eq!(service.probe_timeout, Duration::from_millis(300));
        assert_eq!(service.endpoint(), config.endpoint);
    }
}
