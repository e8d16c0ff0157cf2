// HTTP client for the device directory API
//
// One endpoint: GET {base}/devices. The client owns URL construction,
// status checking, and the response-shape normalization in `models`.

use hyper::ext::ReasonPhrase;
use reqwest::header::{ACCEPT, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{self, Device};
use crate::transport::TransportConfig;

/// Async client for the device directory REST API.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    devices_url: Url,
}

impl DirectoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client with its own `reqwest::Client` from a transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base = normalize_base_url(base_url);
        let devices_url = Url::parse(&format!("{base}/devices"))?;
        Ok(Self { http, devices_url })
    }

    /// The fully resolved `GET` target, e.g. `https://api.example.com/devices`.
    pub fn devices_url(&self) -> &Url {
        &self.devices_url
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Fetch the device list.
    ///
    /// Non-2xx statuses become [`Error::Http`]. A 2xx body is decoded as
    /// JSON and normalized by [`models::devices_from_value`].
    pub async fn list_devices(&self) -> Result<Vec<Device>, Error> {
        let url = self.devices_url.clone();
        debug!("requesting devices from {url}");

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                status_text: reason_phrase(&resp),
            });
        }

        let body = resp.text().await?;
        let value = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value,
            Err(e) => return Err(decode_error(&e, body)),
        };

        let devices = models::devices_from_value(value);
        debug!(count = devices.len(), "decoded device list");
        Ok(devices)
    }
}

/// The reason phrase the server sent, else the canonical one for the status.
fn reason_phrase(resp: &reqwest::Response) -> String {
    resp.extensions()
        .get::<ReasonPhrase>()
        .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
        .or_else(|| resp.status().canonical_reason())
        .unwrap_or_default()
        .to_owned()
}

/// Strip exactly one trailing slash so `.../api` and `.../api/` agree.
pub fn normalize_base_url(raw: &str) -> &str {
    raw.strip_suffix('/').unwrap_or(raw)
}

fn decode_error(err: &serde_json::Error, body: String) -> Error {
    Error::Deserialization {
        message: err.to_string(),
        body,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> DirectoryClient {
        DirectoryClient::from_reqwest(base, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn trailing_slash_does_not_change_target() {
        assert_eq!(
            client("https://api.example.com/").devices_url().as_str(),
            "https://api.example.com/devices"
        );
        assert_eq!(
            client("https://api.example.com").devices_url().as_str(),
            "https://api.example.com/devices"
        );
    }

    #[test]
    fn base_path_is_kept() {
        assert_eq!(
            client("https://example.com/api/v2/").devices_url().as_str(),
            "https://example.com/api/v2/devices"
        );
    }

    #[test]
    fn only_one_trailing_slash_is_stripped() {
        assert_eq!(normalize_base_url("https://example.com//"), "https://example.com/");
        assert_eq!(normalize_base_url("https://example.com"), "https://example.com");
    }

    #[test]
    fn unparseable_base_is_rejected() {
        let err = DirectoryClient::from_reqwest("not a url", reqwest::Client::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
