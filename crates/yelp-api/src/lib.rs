//! Client library for the Yelp Fusion business API.
//!
//! The facade ([`YelpClient`]) attaches a bearer token from a pluggable
//! [`TokenProvider`] to every call and maps transport failures onto a small
//! error taxonomy ([`ErrorKind`]).

pub mod auth;
pub mod client;
pub mod error;
pub mod search;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use auth::{
    BasicTokenProvider, Credentials, OAuthTokenProvider, Token, TokenCachePolicy, TokenProvider,
    DEFAULT_AUTH_URL,
};
pub use client::{YelpClient, YelpClientBuilder, DEFAULT_BASE_URL};
pub use error::{AuthError, ErrorKind, TransportError, YelpError};
pub use search::{SearchRequest, SortBy};
pub use transport::{HttpRequest, HttpTransport, ReqwestTransport};
pub use types::{Business, BusinessDetails, Review};
