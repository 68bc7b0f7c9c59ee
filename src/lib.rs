//! Retrieves the locations shared with a Google account through Google Maps location sharing.
//!
//! Requests are authenticated with the cookies of a signed-in browser session, exported in the
//! Netscape cookie file format. No login is performed; when the cookies stop working they need
//! to be exported again.
//!
//! # Examples
//! ```no_run
//! use google_location_sharing::LocationSharingClient;
//!
//! # async fn run() -> Result<(), google_location_sharing::Error> {
//! let client = LocationSharingClient::from_cookies_file("cookies.txt", 0).await?;
//!
//! for person in client.fetch_shared_people().await? {
//!     println!("{person}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod cookies;
pub mod decoder;
pub mod person;
pub mod time;
pub mod transport;

pub use client::{LocationSharingClient, LocationSharingClientBuilder, DEFAULT_CACHE_DURATION};
pub use cookies::{CookieEntry, SessionCookies};
pub use error::{DataFormatError, Error, Result};
pub use person::{Coordinates, Person};
pub use time::ServerTime;
pub use transport::{RawResponse, ReqwestTransport, Transport};
