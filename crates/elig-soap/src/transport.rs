//! HTTP exchange with the clearinghouse
//!
//! One POST per inquiry. Connection-level failures (refused, timed out) are
//! retried exactly once; an HTTP error status or a SOAP fault body is a
//! definitive answer and is never retried.

use crate::error::{TransportError, TransportResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Content type the CORE connectivity rule mandates for SOAP+WSDL endpoints
const CONTENT_TYPE: &str = "application/soap+xml; charset=UTF-8; action=\"RealTimeTransaction\"";

/// How many characters of an error body are kept in error messages
const EXCERPT_CHARS: usize = 512;

/// The exchange seam, so the pipeline can be exercised without a network
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST a framed envelope and return the raw response body
    async fn exchange(&self, endpoint: &str, envelope: &str) -> TransportResult<String>;
}

/// The production HTTP client
#[derive(Debug, Clone)]
pub struct TransportClient {
    client: reqwest::Client,
}

impl TransportClient {
    /// Build a client with the given per-request timeout
    pub fn new(timeout: Duration) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { client })
    }

    async fn post_once(
        &self,
        endpoint: &str,
        envelope: &str,
    ) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(endpoint)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(envelope.to_string())
            .send()
            .await
    }
}

#[async_trait]
impl Transport for TransportClient {
    async fn exchange(&self, endpoint: &str, envelope: &str) -> TransportResult<String> {
        debug!(endpoint, bytes = envelope.len(), "posting eligibility inquiry");

        let response = match self.post_once(endpoint, envelope).await {
            Ok(response) => response,
            Err(first) if first.is_timeout() || first.is_connect() => {
                // One retry covers transient connection drops; anything the
                // endpoint actually answered is final.
                warn!(endpoint, error = %first, "connection failed, retrying once");
                self.post_once(endpoint, envelope)
                    .await
                    .map_err(|source| send_error(endpoint, source))?
            }
            Err(source) => return Err(send_error(endpoint, source)),
        };

        let status = response.status();
        let body = response.text().await.map_err(TransportError::Body)?;
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                excerpt: bounded_excerpt(&body),
            });
        }
        debug!(endpoint, status = status.as_u16(), bytes = body.len(), "response received");
        Ok(body)
    }
}

/// First `EXCERPT_CHARS` characters of a body, whole characters only
fn bounded_excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHARS).collect()
}

/// Deadline expiry and connection failures get distinct variants so callers
/// can tell a slow endpoint from an unreachable one.
fn send_error(endpoint: &str, source: reqwest::Error) -> TransportError {
    if source.is_timeout() {
        TransportError::Timeout {
            endpoint: endpoint.to_string(),
            source,
        }
    } else {
        TransportError::Connection {
            endpoint: endpoint.to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn short_bodies_are_kept_whole() {
        assert_eq!(bounded_excerpt("<fault/>"), "<fault/>");
    }

    #[test]
    fn long_bodies_are_truncated_to_the_excerpt_limit() {
        let body = "x".repeat(2000);
        assert_eq!(bounded_excerpt(&body).len(), EXCERPT_CHARS);
    }

    #[test]
    fn truncation_respects_multibyte_characters() {
        let body = "é".repeat(600);
        let excerpt = bounded_excerpt(&body);
        assert_eq!(excerpt.chars().count(), EXCERPT_CHARS);
        assert!(excerpt.chars().all(|c| c == 'é'));
    }

    #[tokio::test]
    async fn deadline_expiry_surfaces_as_timeout() {
        // A bound socket that is never accepted: the connection opens via
        // the listen backlog and the response never comes.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let endpoint = format!("http://{}/soap", listener.local_addr().unwrap());

        let client = TransportClient::new(Duration::from_millis(200)).unwrap();
        let err = client.exchange(&endpoint, "<e/>").await.unwrap_err();
        assert!(
            matches!(err, TransportError::Timeout { .. }),
            "got {err:?}"
        );
    }
}
