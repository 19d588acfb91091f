/// Submission client — the single point of entry for the apply endpoint.
///
/// One attempt per confirmation: no retries, no backoff. Overlap is
/// prevented upstream by the session state machine, not here.
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::answers::AnswerRecord;

/// The fixed application endpoint. Intentionally not configurable.
pub const APPLY_ENDPOINT: &str =
    "https://asia-northeast1-willeder-official.cloudfunctions.net/api/apply/frontend";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Posts the full answer record as JSON to the apply endpoint.
#[derive(Clone)]
pub struct SubmitClient {
    client: Client,
    endpoint: String,
}

impl SubmitClient {
    pub fn new(timeout: Duration) -> Self {
        Self::with_endpoint(APPLY_ENDPOINT.to_string(), timeout)
    }

    fn with_endpoint(endpoint: String, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }

    /// Sends the snapshot and returns the response body. Any transport
    /// failure or non-success status is an error for the caller to surface;
    /// nothing here is retried.
    pub async fn submit(&self, record: &AnswerRecord) -> Result<String, SubmitError> {
        debug!("Hitting URL: {}", self.endpoint);

        let response = self.client.post(&self.endpoint).json(record).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SubmitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        debug!("Application accepted: {body}");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response on a loopback port.
    async fn one_shot_server(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            // Drain the request: headers, then the content-length body.
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let body_len = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find_headers_end(&buf) {
                    let headers = String::from_utf8_lossy(&buf[..pos]);
                    let len = headers
                        .lines()
                        .find_map(|l| l.to_ascii_lowercase().strip_prefix("content-length:").map(str::trim).map(str::to_string))
                        .and_then(|v| v.parse::<usize>().ok())
                        .unwrap_or(0);
                    break (pos + 4 + len).saturating_sub(buf.len());
                }
                if n == 0 {
                    break 0;
                }
            };
            let mut remaining = body_len;
            while remaining > 0 {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                remaining = remaining.saturating_sub(n);
            }
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    fn find_headers_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    #[tokio::test]
    async fn test_submit_returns_response_body_on_success() {
        let endpoint = one_shot_server(
            "HTTP/1.1 200 OK\r\nContent-Length: 8\r\nConnection: close\r\n\r\nreceived",
        )
        .await;
        let client = SubmitClient::with_endpoint(endpoint, Duration::from_secs(5));

        let body = client.submit(&AnswerRecord::default()).await.unwrap();
        assert_eq!(body, "received");
    }

    #[tokio::test]
    async fn test_submit_maps_server_error_to_api_error() {
        let endpoint = one_shot_server(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\noops",
        )
        .await;
        let client = SubmitClient::with_endpoint(endpoint, Duration::from_secs(5));

        let err = client.submit(&AnswerRecord::default()).await.unwrap_err();
        match err {
            SubmitError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "oops");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_maps_transport_failure_to_http_error() {
        // Nothing listens here; bind-and-drop reserves a dead port.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = SubmitClient::with_endpoint(endpoint, Duration::from_secs(2));
        let err = client.submit(&AnswerRecord::default()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Http(_)));
    }
}
