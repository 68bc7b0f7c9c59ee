//! The client for getting the people sharing their location with an account.
//!
//! A client is built from cookies that must contain a session cookie, otherwise building fails
//! with [`InvalidCookies`] without making any request. Once built, every fetch is a single round
//! trip. Cookies issued by Google in the response are merged back into the client's cookies so
//! the session keeps working when Google rotates them. When Google reports the session as
//! invalid the fetch fails with [`SessionInvalid`]; the client does not try to recover and new
//! cookies are needed.
//!
//! [`InvalidCookies`]: crate::Error::InvalidCookies
//! [`SessionInvalid`]: crate::Error::SessionInvalid
//!
//! Fetches are serialized per client. Failed fetches are never cached, the error is returned
//! and the next fetch makes a new request.

mod builder;
mod cache;

pub use builder::{LocationSharingClientBuilder, DEFAULT_CACHE_DURATION};

use cache::ResponseCache;
use crate::cookies::{CookieEntry, SessionCookies};
use crate::decoder;
use crate::error::{DataFormatError, Result};
use crate::person::{self, Coordinates, Person};
use crate::time::ServerTime;
use crate::transport::{LocationRequest, Transport};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;

/// Client for Google Maps location sharing. Clones share the same cookies and cache.
#[derive(Debug, Clone)]
pub struct LocationSharingClient {
    /// Index of the signed-in account to query.
    authuser: u32,
    language: String,
    country: String,
    transport: Arc<dyn Transport>,
    cookies: Arc<RwLock<SessionCookies>>,
    /// Held for the duration of a fetch.
    cache: Arc<Mutex<ResponseCache>>,
}

impl LocationSharingClient {
    /// Builder for constructing a [`LocationSharingClient`].
    pub fn builder() -> LocationSharingClientBuilder {
        LocationSharingClientBuilder::new()
    }

    /// Creates a new [`LocationSharingClient`] with the default settings.
    pub fn new(cookies: SessionCookies, authuser: u32) -> Result<Self> {
        Self::builder()
            .authuser(authuser)
            .build(cookies)
    }

    /// Creates a new [`LocationSharingClient`] from the contents of a Netscape-format cookie
    /// file.
    pub fn from_cookies_str(contents: &str, authuser: u32) -> Result<Self> {
        Self::builder()
            .authuser(authuser)
            .build_from_cookies_str(contents)
    }

    /// Creates a new [`LocationSharingClient`] from parsed cookie file entries.
    pub fn from_cookie_entries(entries: &[CookieEntry], authuser: u32) -> Result<Self> {
        Self::new(SessionCookies::from(entries), authuser)
    }

    /// Creates a new [`LocationSharingClient`] from a Netscape-format cookie file.
    pub async fn from_cookies_file<P>(path: P, authuser: u32) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::builder()
            .authuser(authuser)
            .build_from_cookies_file(path)
            .await
    }

    /// Creates a new [`LocationSharingClient`] and checks with Google that the session is valid.
    pub async fn connect(cookies: SessionCookies, authuser: u32) -> Result<Self> {
        let client = Self::new(cookies, authuser)?;

        client.validate().await?;

        Ok(client)
    }

    pub(crate) fn new_with(
        cookies: SessionCookies,
        transport: Arc<dyn Transport>,
        authuser: u32,
        language: String,
        country: String,
        cache_duration: Option<Duration>,
    ) -> Self {
        Self {
            authuser,
            language,
            country,
            transport,
            cookies: Arc::new(RwLock::new(cookies)),
            cache: Arc::new(Mutex::new(ResponseCache::new(cache_duration))),
        }
    }

    /// The index of the account being queried.
    pub fn authuser(&self) -> u32 {
        self.authuser
    }

    /// A copy of the current cookies, including any updates issued by Google. Useful for
    /// persisting rotated cookies.
    pub fn cookies(&self) -> SessionCookies {
        self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Checks that Google accepts the session. Fails with [`Error::SessionInvalid`] if it does
    /// not. The response is cached.
    ///
    /// [`Error::SessionInvalid`]: crate::Error::SessionInvalid
    pub async fn validate(&self) -> Result<()> {
        let mut cache = self.cache.lock().await;
        let people = self.request_shared_people().await?;

        cache.store(&people);
        Ok(())
    }

    /// Gets the people sharing their location with the account, in the order Google returns
    /// them. Uses the cached response if it is still fresh.
    pub async fn fetch_shared_people(&self) -> Result<Vec<Person>> {
        let mut cache = self.cache.lock().await;

        if let Some(people) = cache.get() {
            log::debug!("Using cached shared people");
            return Ok(people);
        }

        let people = self.request_shared_people().await?;

        cache.store(&people);
        Ok(people)
    }

    /// Alias of [`LocationSharingClient::fetch_shared_people`].
    pub async fn all_people(&self) -> Result<Vec<Person>> {
        self.fetch_shared_people().await
    }

    /// Discards the cached response.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Gets a person by nickname, ignoring case.
    pub async fn person_by_nickname(&self, nickname: &str) -> Result<Option<Person>> {
        let people = self.fetch_shared_people().await?;

        Ok(person::person_by_nickname(&people, nickname).cloned())
    }

    /// Gets a person by full name, ignoring case.
    pub async fn person_by_full_name(&self, full_name: &str) -> Result<Option<Person>> {
        let people = self.fetch_shared_people().await?;

        Ok(person::person_by_full_name(&people, full_name).cloned())
    }

    /// Gets the coordinates of a person by nickname.
    pub async fn coordinates_by_nickname(&self, nickname: &str) -> Result<Option<Coordinates>> {
        Ok(self.person_by_nickname(nickname).await?.and_then(|person| person.coordinates()))
    }

    /// Gets the coordinates of a person by full name.
    pub async fn coordinates_by_full_name(&self, full_name: &str) -> Result<Option<Coordinates>> {
        Ok(self.person_by_full_name(full_name).await?.and_then(|person| person.coordinates()))
    }

    /// Gets the time a person's location was last reported by nickname.
    pub async fn datetime_by_nickname(&self, nickname: &str) -> Result<Option<ServerTime>> {
        Ok(self.person_by_nickname(nickname).await?.and_then(|person| person.datetime))
    }

    /// Gets the time a person's location was last reported by full name.
    pub async fn datetime_by_full_name(&self, full_name: &str) -> Result<Option<ServerTime>> {
        Ok(self.person_by_full_name(full_name).await?.and_then(|person| person.datetime))
    }

    fn location_request(&self) -> LocationRequest {
        let cookie_header = self.cookies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .to_header();

        LocationRequest {
            authuser: self.authuser,
            language: self.language.clone(),
            country: self.country.clone(),
            cookie_header,
        }
    }

    async fn request_shared_people(&self) -> Result<Vec<Person>> {
        let request = self.location_request();
        let response = self.transport.send(&request).await?;

        if !response.set_cookies.is_empty() {
            self.cookies
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .merge_updates(&response.set_cookies);
        }

        if !response.is_success() {
            return Err(DataFormatError::Status {
                status: response.status,
                body: response.body,
            }.into());
        }

        decoder::decode_response(&response.body)
    }
}
