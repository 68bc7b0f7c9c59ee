//! Errors surfaced by the client.

/// Result type with the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// None of the recognized session cookies are present. Supply new cookies.
    #[error("Invalid cookies: {}", .0)]
    InvalidCookies(String),
    /// The cookie file could not be read.
    #[error("Could not open cookies file: {}", .0)]
    InvalidCookieFile(#[from] std::io::Error),
    /// Google rejected the session. The cookies need to be refreshed out of band.
    #[error("Invalid cookies: Does not seem we have a valid session")]
    SessionInvalid,
    /// The response could not be interpreted.
    #[error("Received invalid data: {}", .0)]
    DataFormat(#[from] DataFormatError),
    #[error("Request error: {}", .0)]
    Reqwest(#[from] reqwest::Error),
    #[error("Request middleware error: {}", .0)]
    ReqwestMiddleware(anyhow::Error),
    #[error("Invalid URL: {}", .0)]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Whether the error means the cookies no longer (or never did) authenticate. Retrying with
    /// the same cookies will not help.
    pub fn is_session_error(&self) -> bool {
        matches!(self, Self::InvalidCookies(_) | Self::SessionInvalid)
    }

    /// Whether the failure may be transient and a later retry could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DataFormat(_) | Self::Reqwest(_) | Self::ReqwestMiddleware(_),
        )
    }
}

impl From<reqwest_middleware::Error> for Error {
    fn from(error: reqwest_middleware::Error) -> Error {
        match error {
            reqwest_middleware::Error::Reqwest(e) => Error::Reqwest(e),
            reqwest_middleware::Error::Middleware(e) => Error::ReqwestMiddleware(e),
        }
    }
}

/// The response did not fit the expected envelope. Each variant carries the raw body for
/// diagnostics.
#[derive(thiserror::Error, Debug)]
pub enum DataFormatError {
    #[error("no JSON payload found in response {body:?}")]
    MissingEnvelope {
        body: String,
    },
    #[error("{source}, cannot parse {body:?} properly")]
    Json {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    #[error("HTTP status {status} with response {body:?}")]
    Status {
        status: u16,
        body: String,
    },
}

impl DataFormatError {
    /// The raw response body.
    pub fn body(&self) -> &str {
        match self {
            Self::MissingEnvelope { body } => body,
            Self::Json { body, .. } => body,
            Self::Status { body, .. } => body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        let error = Error::DataFormat(DataFormatError::Status {
            status: 500,
            body: String::from("oops"),
        });

        assert!(error.is_retryable());
        assert!(!error.is_session_error());
        assert!(Error::SessionInvalid.is_session_error());
        assert!(!Error::SessionInvalid.is_retryable());
        assert!(Error::InvalidCookies(String::new()).is_session_error());
    }

    #[test]
    fn exposes_raw_body() {
        let error = DataFormatError::MissingEnvelope {
            body: String::from("<html>"),
        };

        assert_eq!(error.body(), "<html>");
    }
}
