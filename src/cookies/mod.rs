//! Cookies used to authenticate with Google.

mod netscape;
mod set_cookie;

pub use netscape::{CookieEntry, parse_netscape_cookies};
pub use set_cookie::{SetCookie, split_set_cookie_header};

use crate::time::{ServerTime, get_server_time_now};
use std::fmt;

/// The names of the cookies that identify a Google session. At least one is required.
pub const SESSION_COOKIE_NAMES: [&str; 2] = ["__Secure-1PSID", "__Secure-3PSID"];

/// Checks whether the entries contain at least one of the [`SESSION_COOKIE_NAMES`].
pub fn has_valid_session(entries: &[CookieEntry]) -> bool {
    entries
        .iter()
        .any(|entry| SESSION_COOKIE_NAMES.contains(&entry.name.as_str()))
}

/// Name/value pairs sent to Google. Names are unique and keep the order they were first
/// inserted in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    cookies: Vec<(String, String)>,
}

impl SessionCookies {
    /// Creates an empty set of cookies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses cookies from the contents of a Netscape-format cookie file.
    pub fn from_netscape(contents: &str) -> Self {
        Self::from(parse_netscape_cookies(contents).as_slice())
    }

    /// Sets a cookie, overwriting the value of an existing cookie with the same name.
    pub fn insert<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        let value = value.into();

        if let Some((_, existing)) = self.cookies.iter_mut().find(|(n, _)| *n == name) {
            *existing = value;
        } else {
            self.cookies.push((name, value));
        }
    }

    /// Removes a cookie. Returns its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.cookies.iter().position(|(n, _)| n == name)?;

        Some(self.cookies.remove(index).1)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Iterates the cookies as `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Checks whether at least one of the [`SESSION_COOKIE_NAMES`] is present.
    pub fn has_valid_session(&self) -> bool {
        SESSION_COOKIE_NAMES
            .iter()
            .any(|name| self.get(name).is_some())
    }

    /// Renders the value for a `Cookie` request header.
    pub fn to_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Applies `Set-Cookie` header values issued by the server. Each value may contain a single
    /// cookie or several comma-combined cookies. Expired cookies are removed.
    pub fn merge_updates<I, S>(&mut self, headers: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.merge_updates_at(headers, get_server_time_now());
    }

    /// Same as [`SessionCookies::merge_updates`] with expiry dates checked against `now`.
    pub fn merge_updates_at<I, S>(&mut self, headers: I, now: ServerTime)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for header in headers {
            for fragment in split_set_cookie_header(header.as_ref()) {
                let Some(set_cookie) = SetCookie::parse(fragment) else {
                    continue;
                };

                if set_cookie.is_expired(now) {
                    if self.remove(&set_cookie.name).is_some() {
                        log::debug!("Removed expired cookie {}", set_cookie.name);
                    }
                } else {
                    self.insert(set_cookie.name, set_cookie.value);
                }
            }
        }
    }
}

impl From<&[CookieEntry]> for SessionCookies {
    fn from(entries: &[CookieEntry]) -> Self {
        let mut cookies = Self::new();

        for entry in entries {
            cookies.insert(entry.name.as_str(), entry.value.as_str());
        }

        cookies
    }
}

impl<N, V> FromIterator<(N, V)> for SessionCookies
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut cookies = Self::new();

        for (name, value) in iter {
            cookies.insert(name, value);
        }

        cookies
    }
}

impl fmt::Display for SessionCookies {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Values are credentials.
        write!(f, "{} cookies", self.cookies.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOKIES: &str = "google.com\tTRUE\t/\tTRUE\t9999999999\t__Secure-1PSID\tabc123\n\
        google.com\tTRUE\t/\tTRUE\t9999999999\tNID\tnid\n\
        google.com\tTRUE\t/\tTRUE\t9999999999\tSIDCC\tsidcc\n";

    fn header_pairs(header: &str) -> Vec<&str> {
        let mut pairs = header.split("; ").collect::<Vec<_>>();

        pairs.sort();
        pairs
    }

    #[test]
    fn renders_every_pair_once() {
        let cookies = SessionCookies::from_netscape(COOKIES);

        assert_eq!(
            header_pairs(&cookies.to_header()),
            vec!["NID=nid", "SIDCC=sidcc", "__Secure-1PSID=abc123"],
        );
    }

    #[test]
    fn last_entry_wins() {
        let cookies = SessionCookies::from_netscape(&format!(
            "{COOKIES}google.com\tTRUE\t/\tTRUE\t0\tNID\tnewer\n"
        ));

        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.get("NID"), Some("newer"));
        assert_eq!(cookies.to_header(), "__Secure-1PSID=abc123; NID=newer; SIDCC=sidcc");
    }

    #[test]
    fn checks_session_cookies() {
        let entries = parse_netscape_cookies(COOKIES);
        let unrelated = parse_netscape_cookies("google.com\tTRUE\t/\tTRUE\t0\tNID\tnid");
        let third_party = parse_netscape_cookies("google.com\tTRUE\t/\tTRUE\t0\t__Secure-3PSID\tx");

        assert!(has_valid_session(&entries));
        assert!(has_valid_session(&third_party));
        assert!(!has_valid_session(&unrelated));
        assert!(!has_valid_session(&[]));
        assert!(SessionCookies::from(entries.as_slice()).has_valid_session());
        assert!(!SessionCookies::new().has_valid_session());
    }

    #[test]
    fn merges_updates() {
        let mut cookies = SessionCookies::from_netscape(COOKIES);

        cookies.merge_updates([
            "SIDCC=rotated; Expires=Wed, 09 Jun 2100 10:18:14 GMT; Path=/; Secure",
            "NEW=1; Path=/",
        ]);

        assert_eq!(cookies.get("SIDCC"), Some("rotated"));
        assert_eq!(cookies.get("NEW"), Some("1"));
        assert_eq!(cookies.get("__Secure-1PSID"), Some("abc123"));
    }

    #[test]
    fn merges_combined_header() {
        let mut cookies = SessionCookies::from_netscape(COOKIES);

        cookies.merge_updates([
            "SIDCC=rotated; Expires=Wed, 09 Jun 2100 10:18:14 GMT; Path=/, NID=; Max-Age=0",
        ]);

        assert_eq!(cookies.get("SIDCC"), Some("rotated"));
        assert_eq!(cookies.get("NID"), None);
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn removes_expired_cookies() {
        let mut cookies = SessionCookies::from_netscape(COOKIES);

        cookies.merge_updates(["SIDCC=gone; Expires=Wed, 09 Jun 2025 10:18:14 GMT"]);
        cookies.merge_updates(["UNKNOWN=gone; Max-Age=-1"]);

        assert_eq!(cookies.get("SIDCC"), None);
        assert_eq!(cookies.get("UNKNOWN"), None);
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn removes_cookies_expired_in_other_date_formats() {
        let mut cookies = SessionCookies::from_netscape(COOKIES);

        cookies.merge_updates(["SIDCC=gone; Expires=Sun Nov  6 08:49:37 1994"]);
        cookies.merge_updates(["NID=gone; Expires=Thu, 01 Jan 1970 00:00:00 +0000"]);

        assert_eq!(cookies.get("SIDCC"), None);
        assert_eq!(cookies.get("NID"), None);
        assert_eq!(cookies.len(), 1);
    }

    #[test]
    fn merging_is_idempotent() {
        let update = "SIDCC=rotated; Max-Age=600, NID=; Max-Age=0, OTHER=2";
        let mut once = SessionCookies::from_netscape(COOKIES);
        let mut twice = once.clone();

        once.merge_updates([update]);
        twice.merge_updates([update]);
        twice.merge_updates([update]);

        assert_eq!(once, twice);
    }

    #[test]
    fn skips_malformed_updates() {
        let mut cookies = SessionCookies::from_netscape(COOKIES);
        let before = cookies.clone();

        cookies.merge_updates(["", "garbage", "=nameless; Path=/"]);

        assert_eq!(cookies, before);
    }
}
