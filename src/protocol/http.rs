// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP transport for the Smobot local API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::ProtocolError;

// ============================================================================
// HttpConfig - Connection parameters for a Smobot
// ============================================================================

/// Configuration for the HTTP connection to a Smobot.
///
/// # Examples
///
/// ```
/// use smobot_lib::protocol::HttpConfig;
/// use std::time::Duration;
///
/// let config = HttpConfig::new("192.168.1.60");
/// assert_eq!(config.base_url(), "http://192.168.1.60/ajax/");
///
/// let config = HttpConfig::new("192.168.1.60")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(3));
/// assert_eq!(config.base_url(), "http://192.168.1.60:8080/ajax/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl HttpConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Path prefix of every device endpoint.
    pub const API_PREFIX: &'static str = "/ajax/";

    /// Creates a new configuration for the specified host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the Smobot, optionally with
    ///   a `:port` suffix
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the API base URL, `http://<host>[:port]/ajax/`.
    #[must_use]
    pub fn base_url(&self) -> String {
        let port_suffix = if self.port == Self::DEFAULT_PORT {
            String::new()
        } else {
            format!(":{}", self.port)
        };
        format!("http://{}{port_suffix}{}", self.authority(), Self::API_PREFIX)
    }

    /// Returns the host with surrounding whitespace, an `http://` prefix and
    /// trailing slashes removed.
    fn authority(&self) -> &str {
        self.host
            .trim()
            .trim_start_matches("http://")
            .trim_end_matches('/')
    }

    /// Checks that the host can be turned into a plain HTTP base URL.
    fn validate(&self) -> Result<(), ProtocolError> {
        let authority = self.authority();

        if authority.is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "host is required".to_string(),
            ));
        }
        if authority.contains("://") {
            return Err(ProtocolError::InvalidAddress(format!(
                "{}: only plain http is supported",
                self.host
            )));
        }
        if authority.contains('/') {
            return Err(ProtocolError::InvalidAddress(format!(
                "{}: host must not contain a path",
                self.host
            )));
        }
        if self.port != Self::DEFAULT_PORT && has_port(authority) {
            return Err(ProtocolError::InvalidAddress(format!(
                "{}: port given both in host and as {}",
                self.host, self.port
            )));
        }
        Ok(())
    }

    /// Creates an `HttpClient` from this configuration.
    ///
    /// No request is sent.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::InvalidAddress` if the host is empty, uses a
    /// scheme other than `http`, carries a path, or carries a port while a
    /// different one is set with [`with_port`](Self::with_port). Returns
    /// `ProtocolError::Http` if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<HttpClient, ProtocolError> {
        self.validate()?;

        let base_url = self.base_url();

        let client = Client::builder()
            .default_headers(default_headers())
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(HttpClient { base_url, client })
    }
}

/// Returns `true` if the authority ends in `:<digits>`, skipping the
/// brackets of an IPv6 literal.
fn has_port(authority: &str) -> bool {
    let tail = authority
        .rsplit_once(']')
        .map_or(authority, |(_, rest)| rest);
    tail.rsplit_once(':')
        .is_some_and(|(_, port)| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

/// Headers sent with every request.
///
/// `Accept-Encoding: gzip, deflate` is added by reqwest itself, which also
/// decodes compressed bodies.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-us"));
    headers
}

/// Encodes key/value pairs as an `application/x-www-form-urlencoded` body.
fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

// ============================================================================
// HttpClient - Reusable session against one device
// ============================================================================

/// HTTP session bound to one Smobot.
///
/// Holds a single pooled `reqwest::Client`; cloning shares the pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Creates a new HTTP client for the specified host with default
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns error if the host is empty or the HTTP client cannot be
    /// created.
    pub fn new(host: impl Into<String>) -> Result<Self, ProtocolError> {
        HttpConfig::new(host).into_client()
    }

    /// Returns the API base URL of the device.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the URL of an endpoint below the API prefix.
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Sends `GET <base>/<endpoint>` and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Http` on connection failure and
    /// `ProtocolError::Status` on a non-success status code.
    pub async fn get(&self, endpoint: &str) -> Result<String, ProtocolError> {
        let url = self.build_url(endpoint);

        tracing::debug!(url = %url, "Sending HTTP GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        Self::read_body(response).await
    }

    /// Sends `POST <base>/<endpoint>` with a form-encoded body and returns
    /// the response body.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError::Http` on connection failure and
    /// `ProtocolError::Status` on a non-success status code.
    pub async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, ProtocolError> {
        let url = self.build_url(endpoint);
        let body = form_body(fields);

        tracing::debug!(url = %url, body = %body, "Sending HTTP POST");

        let response = self
            .client
            .post(&url)
            .body(body)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        Self::read_body(response).await
    }

    async fn read_body(response: reqwest::Response) -> Result<String, ProtocolError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;

        tracing::debug!(body = %body, "Received HTTP response");

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_for_endpoints() {
        let client = HttpClient::new("192.168.1.60").unwrap();
        assert_eq!(client.build_url("smobot"), "http://192.168.1.60/ajax/smobot");
        assert_eq!(
            client.build_url("setgrillset"),
            "http://192.168.1.60/ajax/setgrillset"
        );
    }

    #[test]
    fn empty_host_is_rejected() {
        assert!(matches!(
            HttpClient::new(""),
            Err(ProtocolError::InvalidAddress(_))
        ));
        assert!(HttpClient::new("http://").is_err());
    }

    #[test]
    fn form_body_encoding() {
        assert_eq!(form_body(&[("setpoint", "225")]), "setpoint=225");
        assert_eq!(form_body(&[("a", "b c"), ("d", "&")]), "a=b%20c&d=%26");
    }

    #[test]
    fn default_headers_match_device_expectations() {
        let headers = default_headers();
        assert_eq!(headers[ACCEPT], "*/*");
        assert_eq!(
            headers[CONTENT_TYPE],
            "application/x-www-form-urlencoded; charset=UTF-8"
        );
        assert_eq!(headers[ACCEPT_LANGUAGE], "en-us");
    }

    // =========================================================================
    // HttpConfig tests
    // =========================================================================

    #[test]
    fn http_config_default_values() {
        let config = HttpConfig::new("192.168.1.60");
        assert_eq!(config.host(), "192.168.1.60");
        assert_eq!(config.port(), 80);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn http_config_with_timeout() {
        let config = HttpConfig::new("192.168.1.60").with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn http_config_base_url() {
        assert_eq!(
            HttpConfig::new("192.168.1.60").base_url(),
            "http://192.168.1.60/ajax/"
        );
        assert_eq!(
            HttpConfig::new("smobot.local").with_port(8080).base_url(),
            "http://smobot.local:8080/ajax/"
        );
    }

    #[test]
    fn http_config_base_url_accepts_host_with_port_and_scheme() {
        assert_eq!(
            HttpConfig::new("127.0.0.1:4000").base_url(),
            "http://127.0.0.1:4000/ajax/"
        );
        assert_eq!(
            HttpConfig::new("http://127.0.0.1:4000/").base_url(),
            "http://127.0.0.1:4000/ajax/"
        );
    }

    #[test]
    fn http_config_rejects_other_schemes() {
        let result = HttpConfig::new("https://smobot.local").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn http_config_rejects_host_without_name() {
        for host in ["", "   ", "/", "http://", "http:///"] {
            let result = HttpConfig::new(host).into_client();
            assert!(
                matches!(result, Err(ProtocolError::InvalidAddress(_))),
                "host {host:?}"
            );
        }
    }

    #[test]
    fn http_config_rejects_path_in_host() {
        let result = HttpConfig::new("192.168.1.60/ajax").into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn http_config_rejects_two_ports() {
        let result = HttpConfig::new("127.0.0.1:4000").with_port(8080).into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));

        let result = HttpConfig::new("[fe80::1]:4000").with_port(8080).into_client();
        assert!(matches!(result, Err(ProtocolError::InvalidAddress(_))));
    }

    #[test]
    fn http_config_accepts_single_port() {
        let client = HttpConfig::new("127.0.0.1:4000").into_client().unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:4000/ajax/");

        let client = HttpConfig::new("[fe80::1]").with_port(8080).into_client().unwrap();
        assert_eq!(client.base_url(), "http://[fe80::1]:8080/ajax/");
    }

    #[test]
    fn port_detection() {
        assert!(has_port("127.0.0.1:4000"));
        assert!(has_port("[fe80::1]:80"));
        assert!(!has_port("127.0.0.1"));
        assert!(!has_port("[fe80::1]"));
        assert!(!has_port("smobot.local:"));
    }

    #[test]
    fn http_config_into_client() {
        let client = HttpConfig::new("192.168.1.60")
            .with_port(8080)
            .into_client()
            .unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.60:8080/ajax/");
    }
}
