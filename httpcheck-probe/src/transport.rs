//! HTTP transport capability.
//!
//! The engine only needs one operation from the network: issue a HEAD
//! request and report the status code, or fail. [`Transport`] is that
//! seam; [`HttpTransport`] is the reqwest-backed implementation built once
//! at startup and shared read-only by every probe.

use std::time::Duration;

use async_trait::async_trait;
use httpcheck_core::{EngineConfig, Target};
use reqwest::{Client, header};
use tracing::{debug, instrument};

use crate::error::{ProbeError, TransportError};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// User agent string for httpcheck.
const USER_AGENT: &str = concat!("httpcheck/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Transport Trait
// ============================================================================

/// Issues a HEAD request to a target.
///
/// Any completed response is `Ok`, whatever its status code. Only a request
/// that produced no response at all is an `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a HEAD request and returns the response status code.
    async fn head(&self, target: &Target) -> Result<u16, TransportError>;
}

// ============================================================================
// Transport Settings
// ============================================================================

/// Settings for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Open a fresh connection for every request.
    pub disable_keep_alive: bool,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// User agent header.
    pub user_agent: String,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            disable_keep_alive: false,
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl TransportSettings {
    /// Settings carrying the engine's keep-alive policy.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            disable_keep_alive: config.disable_keep_alive(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

// ============================================================================
// HTTP Transport
// ============================================================================

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    inner: Client,
    disable_keep_alive: bool,
}

impl HttpTransport {
    /// Builds the client. Failure here is fatal at startup.
    pub fn new(settings: &TransportSettings) -> Result<Self, ProbeError> {
        let mut builder = Client::builder().user_agent(settings.user_agent.as_str());

        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        if settings.disable_keep_alive {
            builder = builder.pool_max_idle_per_host(0);
        }

        let inner = builder.build().map_err(ProbeError::Client)?;
        debug!(
            keep_alive = !settings.disable_keep_alive,
            timeout = ?settings.timeout,
            "HTTP transport ready"
        );

        Ok(Self {
            inner,
            disable_keep_alive: settings.disable_keep_alive,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip_all, fields(url = %target))]
    async fn head(&self, target: &Target) -> Result<u16, TransportError> {
        let mut request = self.inner.head(target.as_str());
        if self.disable_keep_alive {
            request = request.header(header::CONNECTION, "close");
        }

        let response = request.send().await?;
        debug!(status = %response.status(), "Response received");
        Ok(response.status().as_u16())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Accepts one connection, captures the request head, and answers with
    /// `status_line`.
    async fn one_shot_server(status_line: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!("{status_line}\r\ncontent-length: 0\r\n\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
        });

        (format!("http://{addr}/health"), rx)
    }

    fn transport(disable_keep_alive: bool) -> HttpTransport {
        let settings = TransportSettings {
            disable_keep_alive,
            timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        HttpTransport::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn test_head_reports_status_verbatim() {
        let (url, request) = one_shot_server("HTTP/1.1 503 Service Unavailable").await;

        let status = transport(false).head(&Target::new(&url)).await.unwrap();
        assert_eq!(status, 503);

        let request = request.await.unwrap();
        assert!(request.starts_with("HEAD /health HTTP/1.1"), "{request}");
        assert!(request.to_ascii_lowercase().contains("user-agent: httpcheck/"));
    }

    #[tokio::test]
    async fn test_disabled_keep_alive_sends_connection_close() {
        let (url, request) = one_shot_server("HTTP/1.1 200 OK").await;

        let status = transport(true).head(&Target::new(&url)).await.unwrap();
        assert_eq!(status, 200);

        let request = request.await.unwrap().to_ascii_lowercase();
        assert!(request.contains("connection: close"), "{request}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_an_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = transport(false)
            .head(&Target::new(format!("http://{addr}/")))
            .await
            .unwrap_err();
        assert!(!err.is_timeout());
        assert!(!err.describe().is_empty());
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without answering.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let settings = TransportSettings::default().with_timeout(Some(Duration::from_millis(100)));
        let err = HttpTransport::new(&settings)
            .unwrap()
            .head(&Target::new(format!("http://{addr}/")))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_malformed_url_is_an_error() {
        let result = transport(false).head(&Target::new("not a url")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_follow_engine_config() {
        let config = EngineConfig::new(4, Duration::ZERO, true).unwrap();
        let settings = TransportSettings::from_config(&config);
        assert!(settings.disable_keep_alive);
        assert_eq!(settings.timeout, Some(DEFAULT_TIMEOUT));
    }
}
