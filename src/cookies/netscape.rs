use serde::{Deserialize, Serialize};

/// One line of a Netscape-format cookie file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieEntry {
    /// The domain the cookie belongs to.
    pub domain: String,
    /// Whether subdomains may read the cookie.
    pub flag: bool,
    /// The path the cookie is scoped to.
    pub path: String,
    /// Whether the cookie is only sent over secure connections.
    pub secure: bool,
    /// Expiry as seconds since the Unix epoch. `0` for session cookies or unparseable values.
    pub expiry: u64,
    /// The name of the cookie.
    pub name: String,
    /// The value of the cookie.
    pub value: String,
}

/// Parses the contents of a Netscape-format cookie file.
///
/// Blank lines and lines starting with `#` are skipped, as are lines with fewer than 7 fields.
pub fn parse_netscape_cookies(contents: &str) -> Vec<CookieEntry> {
    contents
        .lines()
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<CookieEntry> {
    let line = line.trim();

    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let mut fields = line.split_whitespace();
    let domain = fields.next()?;
    let flag = fields.next()?;
    let path = fields.next()?;
    let secure = fields.next()?;
    let expiry = fields.next()?;
    let name = fields.next()?;
    let value = fields.next()?;

    Some(CookieEntry {
        domain: domain.into(),
        flag: parse_bool(flag),
        path: path.into(),
        secure: parse_bool(secure),
        expiry: expiry.parse::<u64>().unwrap_or(0),
        name: name.into(),
        value: value.into(),
    })
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("TRUE") || value == "1"
}
