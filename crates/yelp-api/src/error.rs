use thiserror::Error;

/// Coarse classification shared by every error in this crate.
///
/// Callers that only care about "what went wrong" rather than which layer
/// produced it should match on this instead of the concrete variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad constructor or builder input. Never retried.
    InvalidConfiguration,
    /// The token endpoint rejected the client id/secret pair (HTTP 400).
    BadCredentials,
    /// The token exchange failed for any other transport reason.
    TokenAcquisitionFailed,
    /// The token endpoint answered 2xx with an unusable body.
    MalformedResponse,
    /// HTTP 401 from the API, or no token could be obtained.
    Unauthenticated,
    /// HTTP 400 from the API, or the caller supplied invalid input.
    BadArgument,
    /// Anything else.
    OperationFailed,
}

/// Failure reported by an [`HttpTransport`](crate::transport::HttpTransport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {url}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// Network, TLS, or timeout failure before a response was received.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response whose body is not valid JSON.
    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl TransportError {
    /// `true` when the server actually answered (with a non-2xx status).
    #[must_use]
    pub fn has_response(&self) -> bool {
        matches!(self, TransportError::Status { .. })
    }

    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request { source, .. } => source.status().map(|s| s.as_u16()),
            TransportError::Decode { .. } => None,
        }
    }

    /// Raw response body, when there was a response.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Status { body, .. } => Some(body),
            TransportError::Request { .. } | TransportError::Decode { .. } => None,
        }
    }
}

/// Errors produced while constructing a token provider or obtaining a token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid token provider configuration: {0}")]
    InvalidConfiguration(String),

    /// The token endpoint returned HTTP 400. `body` carries the server's
    /// explanation verbatim.
    #[error("client id or secret rejected by the token endpoint: {body}")]
    BadCredentials { body: String },

    #[error("failed to obtain access token: {source}")]
    TokenAcquisitionFailed {
        #[source]
        source: TransportError,
    },

    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            AuthError::BadCredentials { .. } => ErrorKind::BadCredentials,
            AuthError::TokenAcquisitionFailed { .. } => ErrorKind::TokenAcquisitionFailed,
            AuthError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }
}

/// Errors returned by [`YelpClient`](crate::client::YelpClient).
#[derive(Debug, Error)]
pub enum YelpError {
    #[error("invalid client configuration: {0}")]
    InvalidConfiguration(String),

    /// The token provider could not supply a token; no API call was made.
    #[error("no access token available: {0}")]
    TokenUnavailable(#[source] AuthError),

    /// The API answered HTTP 401.
    #[error("request to {url} was not authenticated")]
    Unauthenticated {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("bad argument: {message}")]
    BadArgument {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    #[error("operation failed: {message}")]
    OperationFailed {
        message: String,
        #[source]
        source: Option<TransportError>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl YelpError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            YelpError::InvalidConfiguration(_) => ErrorKind::InvalidConfiguration,
            YelpError::TokenUnavailable(_) | YelpError::Unauthenticated { .. } => {
                ErrorKind::Unauthenticated
            }
            YelpError::BadArgument { .. } => ErrorKind::BadArgument,
            YelpError::OperationFailed { .. } | YelpError::Deserialize { .. } => {
                ErrorKind::OperationFailed
            }
        }
    }

    pub(crate) fn bad_argument(message: impl Into<String>) -> Self {
        YelpError::BadArgument {
            message: message.into(),
            source: None,
        }
    }

    /// Classifies a transport failure from a business API call.
    pub(crate) fn from_transport(url: &str, err: TransportError) -> Self {
        match err.status_code() {
            Some(401) if err.has_response() => YelpError::Unauthenticated {
                url: url.to_string(),
                source: err,
            },
            Some(400) if err.has_response() => YelpError::BadArgument {
                message: format!("request to {url} was rejected"),
                source: Some(err),
            },
            _ => YelpError::OperationFailed {
                message: format!("request to {url} failed"),
                source: Some(err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_err(status: u16) -> TransportError {
        TransportError::Status {
            status,
            url: "https://api.yelp.com/v3/businesses/search".to_string(),
            body: "{\"error\":{}}".to_string(),
        }
    }

    #[test]
    fn status_error_exposes_response() {
        let err = status_err(503);
        assert!(err.has_response());
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.body(), Some("{\"error\":{}}"));
    }

    #[test]
    fn decode_error_has_no_response() {
        let source = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = TransportError::Decode {
            url: "https://example.test".to_string(),
            source,
        };
        assert!(!err.has_response());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.body(), None);
    }

    #[test]
    fn transport_401_maps_to_unauthenticated() {
        let err = YelpError::from_transport("u", status_err(401));
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn transport_400_maps_to_bad_argument() {
        let err = YelpError::from_transport("u", status_err(400));
        assert_eq!(err.kind(), ErrorKind::BadArgument);
    }

    #[test]
    fn other_transport_failures_map_to_operation_failed() {
        for status in [403, 404, 429, 500, 502] {
            let err = YelpError::from_transport("u", status_err(status));
            assert_eq!(err.kind(), ErrorKind::OperationFailed, "status {status}");
        }
    }

    #[test]
    fn token_failure_is_unauthenticated_kind() {
        let err = YelpError::TokenUnavailable(AuthError::BadCredentials {
            body: "invalid client".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
        let source = std::error::Error::source(&err).expect("source attached");
        assert!(source.to_string().contains("invalid client"));
    }
}
