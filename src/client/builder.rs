use super::LocationSharingClient;
use crate::cookies::{SessionCookies, SESSION_COOKIE_NAMES};
use crate::error::{Error, Result};
use crate::transport::{get_default_client, ReqwestTransport, Transport, USER_AGENT_STRING};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use reqwest_middleware::ClientWithMiddleware;

/// How long responses are cached by default.
pub const DEFAULT_CACHE_DURATION: Duration = Duration::from_secs(30);

/// Builder for constructing a [`LocationSharingClient`].
#[derive(Debug, Clone)]
pub struct LocationSharingClientBuilder {
    /// Index of the signed-in account to query. Defaults to `0`.
    pub(crate) authuser: u32,
    /// How long a response is reused for. `None` disables caching.
    pub(crate) cache_duration: Option<Duration>,
    /// The `hl` parameter. Defaults to `en`.
    pub(crate) language: String,
    /// The `gl` parameter. Defaults to `us`.
    pub(crate) country: String,
    /// User agent for requests.
    pub(crate) user_agent: &'static str,
    /// Client to use for requests.
    pub(crate) client: Option<ClientWithMiddleware>,
    /// Transport to use for requests. Takes precedence over `client`.
    pub(crate) transport: Option<Arc<dyn Transport>>,
}

impl Default for LocationSharingClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationSharingClientBuilder {
    /// Creates a new [`LocationSharingClientBuilder`].
    pub fn new() -> Self {
        Self {
            authuser: 0,
            cache_duration: Some(DEFAULT_CACHE_DURATION),
            language: String::from("en"),
            country: String::from("us"),
            user_agent: USER_AGENT_STRING,
            client: None,
            transport: None,
        }
    }

    /// Index of the signed-in account to query when the cookies belong to a browser session
    /// with multiple accounts.
    pub fn authuser(mut self, authuser: u32) -> Self {
        self.authuser = authuser;
        self
    }

    /// How long a response is reused for. Pass `None` to request fresh data on every call.
    pub fn cache_duration(mut self, cache_duration: Option<Duration>) -> Self {
        self.cache_duration = cache_duration;
        self
    }

    /// The language of the response (`hl`).
    pub fn language<T>(mut self, language: T) -> Self
    where
        T: Into<String>,
    {
        self.language = language.into();
        self
    }

    /// The country of the response (`gl`).
    pub fn country<T>(mut self, country: T) -> Self
    where
        T: Into<String>,
    {
        self.country = country.into();
        self
    }

    /// User agent for requests. Ignored when a client or transport is supplied.
    pub fn user_agent(mut self, user_agent: &'static str) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Client to use for requests. Cookies are managed by the [`LocationSharingClient`] so the
    /// client should not have a cookie store.
    pub fn client(mut self, client: ClientWithMiddleware) -> Self {
        self.client = Some(client);
        self
    }

    /// Transport to use for requests.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the [`LocationSharingClient`]. Fails if the cookies do not contain a session
    /// cookie.
    pub fn build(self, cookies: SessionCookies) -> Result<LocationSharingClient> {
        if !cookies.has_valid_session() {
            return Err(Error::InvalidCookies(format!(
                "Missing either of {} cookies",
                SESSION_COOKIE_NAMES.join(", "),
            )));
        }

        let transport: Arc<dyn Transport> = match (self.transport, self.client) {
            (Some(transport), _) => transport,
            (None, Some(client)) => Arc::new(ReqwestTransport::new(client)),
            (None, None) => Arc::new(ReqwestTransport::new(get_default_client(self.user_agent)?)),
        };

        Ok(LocationSharingClient::new_with(
            cookies,
            transport,
            self.authuser,
            self.language,
            self.country,
            self.cache_duration,
        ))
    }

    /// Builds the [`LocationSharingClient`] from the contents of a Netscape-format cookie file.
    pub fn build_from_cookies_str(self, contents: &str) -> Result<LocationSharingClient> {
        self.build(SessionCookies::from_netscape(contents))
    }

    /// Builds the [`LocationSharingClient`] from a Netscape-format cookie file.
    pub async fn build_from_cookies_file<P>(self, path: P) -> Result<LocationSharingClient>
    where
        P: AsRef<Path>,
    {
        let contents = async_fs::read_to_string(path).await?;

        self.build_from_cookies_str(&contents)
    }
}
