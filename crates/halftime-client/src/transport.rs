use std::borrow::Cow;
use std::future::Future;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::USER_AGENT;

use serde_json::Value;

use tracing::debug;

use crate::error::{Error, ErrorKind, Result};
use crate::operation::{Method, Operation, PayloadShape};

/// Default service address.
pub const DEFAULT_BASE_URL: &str = "https://api.ipsw.me/v4";

// Default `User-Agent` header value.
const DEFAULT_USER_AGENT: &str = concat!("halftime/", env!("CARGO_PKG_VERSION"));

/// A decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A decoded `json` document.
    Json(Value),
    /// Plain text.
    Text(String),
}

/// Performs the network request of an [`Operation`] and decodes its payload.
///
/// A transport owns connection handling. The client never retries a failed
/// fetch, it returns the error to the caller unchanged.
pub trait Transport: Send + Sync {
    /// Fetches the payload of an [`Operation`], decoded according to its
    /// [`PayloadShape`].
    ///
    /// # Errors
    ///
    /// Network and protocol failures, as well as identifiers rejected by the
    /// service.
    fn fetch(&self, operation: &Operation) -> impl Future<Output = Result<Payload>> + Send;
}

/// An `HTTP` [`Transport`].
///
/// No timeout is applied unless one is configured.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Cow<'static, str>,
    user_agent: Cow<'static, str>,
    timeout: Option<Duration>,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    /// Creates an [`HttpTransport`] for the default service address.
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: Cow::Borrowed(DEFAULT_BASE_URL),
            user_agent: Cow::Borrowed(DEFAULT_USER_AGENT),
            timeout: None,
        }
    }

    /// Changes the service address.
    #[must_use]
    #[inline]
    pub fn base_url(mut self, base_url: impl Into<Cow<'static, str>>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Changes the `User-Agent` header value.
    #[must_use]
    #[inline]
    pub fn user_agent(mut self, user_agent: impl Into<Cow<'static, str>>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets a timeout for every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Transport for HttpTransport {
    async fn fetch(&self, operation: &Operation) -> Result<Payload> {
        let url = operation.url(&self.base_url);
        debug!("{} {url}", operation.method());

        let request_builder = match operation.method() {
            Method::Get => self.client.get(&url),
        };

        let request_builder = request_builder.header(USER_AGENT, self.user_agent.as_ref());

        let request_builder = if let Some(timeout) = self.timeout {
            request_builder.timeout(timeout)
        } else {
            request_builder
        };

        let response = request_builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            // The service answers with these statuses to unknown or
            // malformed identifiers.
            let kind = if matches!(status, StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST) {
                ErrorKind::InvalidParameter
            } else {
                ErrorKind::Transport
            };
            return Err(Error::new(kind, format!("`{url}` answered with {status}")));
        }

        Ok(match operation.shape() {
            PayloadShape::Json => Payload::Json(response.json().await?),
            PayloadShape::Text => Payload::Text(response.text().await?),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::error::ErrorKind;
    use crate::operation::Operation;
    use crate::tests::{serve, service_router};

    use super::{DEFAULT_BASE_URL, HttpTransport, Payload, Transport};

    #[test]
    fn transport_configuration() {
        let transport = HttpTransport::new();

        assert_eq!(transport.base_url, DEFAULT_BASE_URL);
        assert!(transport.user_agent.starts_with("halftime/"));
        assert_eq!(transport.timeout, None);

        let transport = HttpTransport::default()
            .base_url("http://localhost:8080/v4/")
            .user_agent("tests")
            .timeout(Duration::from_secs(3));

        assert_eq!(transport.base_url, "http://localhost:8080/v4/");
        assert_eq!(transport.user_agent, "tests");
        assert_eq!(transport.timeout, Some(Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn json_and_text_payloads() {
        let transport = HttpTransport::new().base_url(serve(service_router()));

        let Payload::Json(firmware) = transport
            .fetch(&Operation::firmware("iPhone12,1", "19A346"))
            .await
            .unwrap()
        else {
            panic!("A firmware must be a json payload");
        };
        assert_eq!(firmware["identifier"], "iPhone12,1");
        assert_eq!(firmware["buildid"], "19A346");

        assert_eq!(
            transport
                .fetch(&Operation::ota_documentation("iPhone12,1", "15.1"))
                .await
                .unwrap(),
            Payload::Text("Release notes".into())
        );
    }

    #[tokio::test]
    async fn user_agent_header() {
        let address = serve(service_router());
        let operation = Operation::firmware("iPhone12,1", "19A346");

        let Payload::Json(firmware) = HttpTransport::new()
            .base_url(address.clone())
            .fetch(&operation)
            .await
            .unwrap()
        else {
            panic!("A firmware must be a json payload");
        };
        assert!(
            firmware["user_agent"]
                .as_str()
                .unwrap()
                .starts_with("halftime/")
        );

        let Payload::Json(firmware) = HttpTransport::new()
            .base_url(address)
            .user_agent("halftime-tests")
            .fetch(&operation)
            .await
            .unwrap()
        else {
            panic!("A firmware must be a json payload");
        };
        assert_eq!(firmware["user_agent"], "halftime-tests");
    }

    #[tokio::test]
    async fn status_mapping() {
        let transport = HttpTransport::new().base_url(serve(service_router()));

        for (status, kind) in [
            ("404", ErrorKind::InvalidParameter),
            ("400", ErrorKind::InvalidParameter),
            ("500", ErrorKind::Transport),
            ("503", ErrorKind::Transport),
        ] {
            let error = transport
                .fetch(&Operation::device(status))
                .await
                .unwrap_err();
            assert_eq!(error.kind(), kind, "status {status}");
        }

        // No route at all.
        let error = transport
            .fetch(&Operation::device_keys("iPhone12,1"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidParameter);

        // A successful answer whose body is not json.
        let error = transport
            .fetch(&Operation::device("200"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn unreachable_and_malformed_addresses() {
        let error = HttpTransport::new()
            .base_url("http://127.0.0.1:1/v4")
            .fetch(&Operation::device("iPhone12,1"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Transport);

        let error = HttpTransport::new()
            .base_url("not an address")
            .fetch(&Operation::device("iPhone12,1"))
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidParameter);
    }
}
