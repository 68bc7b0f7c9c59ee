//! Sending requests to the location sharing endpoint.

use crate::error::Error;
use std::fmt;
use async_trait::async_trait;
use reqwest::header;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use url::Url;

/// The location sharing endpoint.
pub const ENDPOINT: &str = "https://www.google.com/maps/rpc/locationsharing/read";
pub const USER_AGENT_STRING: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
/// Describes how the map would be rendered. It has nothing to do with location sharing but the
/// endpoint requires it. Points to Google's headquarters.
const PB: &str = "!1m7!8m6!1m3!1i14!2i8413!3i5385!2i6!3x4095!2m3!1e0!2sm!3i407105169!3m7!2sen!5e1105!12m4!1e68!2m2!1sset!2sRoadmap!4e1!5m4!1e4!8m2!1e0!1e1!6m9!1e12!2i2!26m1!4b1!30m1!1f1.3953487873077393!39b1!44e1!50e0!23i4111425";

/// A request for the people sharing their location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRequest {
    /// Index of the signed-in account to query.
    pub authuser: u32,
    /// Value of the `hl` parameter.
    pub language: String,
    /// Value of the `gl` parameter.
    pub country: String,
    /// Value of the `Cookie` header.
    pub cookie_header: String,
}

impl LocationRequest {
    /// The query parameters for the request.
    pub fn query(&self) -> [(&'static str, String); 4] {
        [
            ("authuser", self.authuser.to_string()),
            ("hl", self.language.clone()),
            ("gl", self.country.clone()),
            ("pb", PB.to_string()),
        ]
    }

    /// The full URL for the request.
    pub fn url(&self) -> Result<Url, url::ParseError> {
        Url::parse_with_params(ENDPOINT, self.query())
    }
}

/// A response from the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// Values of `Set-Cookie` headers. A value may contain several comma-combined cookies.
    pub set_cookies: Vec<String>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs the HTTP request. Errors are returned to the caller as they are.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    async fn send(&self, request: &LocationRequest) -> Result<RawResponse, Error>;
}

/// Builds the default client.
pub fn get_default_client(user_agent: &'static str) -> Result<ClientWithMiddleware, Error> {
    let mut headers = header::HeaderMap::new();

    headers.insert(header::USER_AGENT, header::HeaderValue::from_static(user_agent));
    headers.insert(header::ACCEPT, header::HeaderValue::from_static("*/*"));

    let client = reqwest::ClientBuilder::new()
        .default_headers(headers)
        .build()?;

    Ok(ClientBuilder::new(client).build())
}

/// [`Transport`] backed by [`reqwest`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ClientWithMiddleware,
}

impl ReqwestTransport {
    pub fn new(client: ClientWithMiddleware) -> Self {
        Self {
            client,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &LocationRequest) -> Result<RawResponse, Error> {
        let response = self.client.get(request.url()?)
            .header(header::COOKIE, &request.cookie_header)
            .send()
            .await?;
        let status = response.status().as_u16();
        let set_cookies = response.headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .map(String::from)
            .collect();
        let body = response.text().await?;

        Ok(RawResponse {
            status,
            body,
            set_cookies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LocationRequest {
        LocationRequest {
            authuser: 2,
            language: "en".into(),
            country: "us".into(),
            cookie_header: "__Secure-1PSID=abc123".into(),
        }
    }

    #[test]
    fn builds_url() {
        let url = request().url().unwrap();
        let query = url.query_pairs().collect::<Vec<_>>();

        assert_eq!(url.host_str(), Some("www.google.com"));
        assert_eq!(url.path(), "/maps/rpc/locationsharing/read");
        assert_eq!(query[0], ("authuser".into(), "2".into()));
        assert_eq!(query[1], ("hl".into(), "en".into()));
        assert_eq!(query[2], ("gl".into(), "us".into()));
        assert_eq!(query[3].1, PB);
    }

    #[test]
    fn checks_status() {
        let mut response = RawResponse {
            status: 200,
            ..Default::default()
        };

        assert!(response.is_success());

        response.status = 302;

        assert!(!response.is_success());
    }
}
