//! Parsing of `Set-Cookie` response header values.

use crate::time::ServerTime;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use cookie::Cookie;

/// Date formats accepted for `Expires` dates the `cookie` crate rejects. A weekday followed by a
/// comma is removed before matching.
const EXPIRES_FORMATS: [&str; 5] = [
    "%d %b %Y %H:%M:%S GMT",
    "%d-%b-%Y %H:%M:%S GMT",
    "%d-%b-%y %H:%M:%S GMT",
    "%d %b %Y %H:%M:%S UTC",
    "%a %b %e %H:%M:%S %Y",
];

/// `Expires` dates with a numeric offset, e.g. `01 Jan 1970 00:00:00 +0000`.
const EXPIRES_OFFSET_FORMAT: &str = "%d %b %Y %H:%M:%S %z";

/// A cookie update issued by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct SetCookie {
    pub name: String,
    pub value: String,
    pub max_age: Option<i64>,
    pub expires: Option<ServerTime>,
}

impl SetCookie {
    /// Parses a single `Set-Cookie` value. `None` if there is no `name=value` pair or the name
    /// is empty.
    pub fn parse(fragment: &str) -> Option<Self> {
        let (pair, attributes) = fragment
            .split_once(';')
            .unwrap_or((fragment, ""));
        let (name, value) = pair.split_once('=')?;
        let name = name.trim();

        if name.is_empty() {
            return None;
        }

        let cookie = Cookie::parse(fragment).ok();
        let max_age = cookie
            .as_ref()
            .and_then(|cookie| cookie.max_age())
            .map(|max_age| max_age.whole_seconds());
        let expires = cookie
            .as_ref()
            .and_then(|cookie| cookie.expires_datetime())
            .and_then(|expires| {
                Utc.timestamp_opt(expires.unix_timestamp(), expires.nanosecond()).single()
            })
            .or_else(|| attribute(attributes, "expires").and_then(parse_expires));

        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
            max_age,
            expires,
        })
    }

    /// Whether the update deletes the cookie rather than setting it.
    pub fn is_expired(&self, now: ServerTime) -> bool {
        self.max_age.is_some_and(|max_age| max_age <= 0) ||
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// The value of the last attribute named `key` in `attributes`.
fn attribute<'a>(attributes: &'a str, key: &str) -> Option<&'a str> {
    attributes
        .split(';')
        .filter_map(|attribute| attribute.split_once('='))
        .filter(|(name, _value)| name.trim().eq_ignore_ascii_case(key))
        .map(|(_name, value)| value.trim())
        .last()
}

/// Parses an `Expires` date such as `Wed, 09 Jun 2025 10:18:14 GMT`. A weekday before a comma
/// is ignored.
fn parse_expires(value: &str) -> Option<ServerTime> {
    let date = value
        .split_once(',')
        .map(|(_weekday, date)| date)
        .unwrap_or(value)
        .trim();

    EXPIRES_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .or_else(|| {
            DateTime::parse_from_str(date, EXPIRES_OFFSET_FORMAT)
                .ok()
                .map(|expires| expires.with_timezone(&Utc))
        })
}

/// Splits a comma-combined `Set-Cookie` header into individual cookie values.
///
/// Commas separate cookies except the one following the weekday of an `Expires` date.
pub fn split_set_cookie_header(header: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut start = 0;
    // Where the current attribute begins. `None` while still in the `name=value` pair.
    let mut attribute_start: Option<usize> = None;
    // Where the value of an `Expires` attribute begins.
    let mut expires_start: Option<usize> = None;

    for (i, c) in header.char_indices() {
        match c {
            ';' => {
                attribute_start = Some(i + 1);
                expires_start = None;
            },
            '=' => {
                if let Some(attribute_start) = attribute_start {
                    if header[attribute_start..i].trim().eq_ignore_ascii_case("expires") {
                        expires_start = Some(i + 1);
                    }
                }
            },
            ',' => {
                if let Some(value_start) = expires_start {
                    let weekday = header[value_start..i].trim();

                    if !weekday.is_empty() && weekday.chars().all(|c| c.is_ascii_alphabetic()) {
                        // The comma belongs to the date.
                        expires_start = None;
                        continue;
                    }
                }

                fragments.push(header[start..i].trim());
                start = i + 1;
                attribute_start = None;
                expires_start = None;
            },
            _ => {},
        }
    }

    fragments.push(header[start..].trim());
    fragments.retain(|fragment| !fragment.is_empty());
    fragments
}
