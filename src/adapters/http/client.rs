//! Publishes chat messages as `POST <destination>?route=..&text=..` (no body).

use crate::domain::{ChatMessage, DomainError, ResponseSummary};
use crate::ports::ChatSink;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound for one attempt; a hung destination counts as a transport error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped; a space
/// becomes `%20`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub struct HttpChatSink {
    client: Client,
    destination: String,
}

impl HttpChatSink {
    /// `destination` is validated per message; a bad one drops messages
    /// instead of failing startup.
    pub fn new(destination: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTP client setup failed; using defaults");
                Client::new()
            });
        Self {
            client,
            destination: destination.into(),
        }
    }

    /// Destination with its query replaced by `route` and `text`.
    fn request_url(&self, message: &ChatMessage) -> Result<Url, DomainError> {
        let mut url = Url::parse(&self.destination).map_err(|e| {
            DomainError::InvalidDestination(format!("{}: {}", self.destination, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DomainError::InvalidDestination(format!(
                "{}: unsupported scheme {}",
                self.destination,
                url.scheme()
            )));
        }
        let query = format!(
            "route={}&text={}",
            utf8_percent_encode(&message.route, QUERY_COMPONENT),
            utf8_percent_encode(&message.text, QUERY_COMPONENT)
        );
        url.set_query(Some(&query));
        Ok(url)
    }
}

#[async_trait::async_trait]
impl ChatSink for HttpChatSink {
    async fn deliver(&self, message: &ChatMessage) -> Result<ResponseSummary, DomainError> {
        let url = self.request_url(message)?;
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        let status = response.status();
        debug!(status = %status, "destination responded");
        Ok(ResponseSummary::new(status.as_u16()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_request_url_replaces_query() {
        let sink = HttpChatSink::new("http://localhost:8973/chat?stale=1");
        let url = sink
            .request_url(&ChatMessage::new("Bob to Everyone", "50% off & more"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8973/chat?route=Bob%20to%20Everyone&text=50%25%20off%20%26%20more"
        );
    }

    #[test]
    fn test_request_url_escapes_reserved_characters() {
        let sink = HttpChatSink::new("https://example.com/hook");
        let url = sink
            .request_url(&ChatMessage::new("Ann to Bo", "1+1=2? #yes\n(ok) caf\u{e9}"))
            .unwrap();
        assert_eq!(
            url.query(),
            Some("route=Ann%20to%20Bo&text=1%2B1%3D2%3F%20%23yes%0A(ok)%20caf%C3%A9")
        );
    }

    #[test]
    fn test_request_url_rejects_bad_destinations() {
        for destination in ["not a url", "/chat", "mailto:someone@example.com"] {
            let sink = HttpChatSink::new(destination);
            assert!(matches!(
                sink.request_url(&ChatMessage::new("a", "b")),
                Err(DomainError::InvalidDestination(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_posts_route_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(query_param("route", "Bob to Everyone"))
            .and(query_param("text", "hi & bye+1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let sink = HttpChatSink::new(format!("{}/chat", server.uri()));
        let summary = sink
            .deliver(&ChatMessage::new("Bob to Everyone", "hi & bye+1"))
            .await
            .unwrap();
        assert_eq!(summary, ResponseSummary::new(204));
        assert!(summary.is_success());
    }

    #[tokio::test]
    async fn test_error_status_is_a_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let sink = HttpChatSink::new(server.uri());
        let summary = sink.deliver(&ChatMessage::new("a", "b")).await.unwrap();
        assert_eq!(summary.status, 503);
        assert!(!summary.is_success());
    }

    #[tokio::test]
    async fn test_unreachable_destination_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let sink = HttpChatSink::new(format!("http://{}/chat", addr));
        assert!(matches!(
            sink.deliver(&ChatMessage::new("a", "b")).await,
            Err(DomainError::Transport(_))
        ));
    }
}
