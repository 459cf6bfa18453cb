// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! Error type shared by every operation of the crate.

use std::result;

/// Crate-wide result type returning [`Error`] by default.
pub type Result<T, E = Error> = result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Constructor input or a permission scope isn't acceptable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An authenticated call was attempted without an access token.
    #[error("this call requires a valid user access token")]
    AuthenticationRequired,

    /// A request parameter was rejected before dispatch.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Network, TLS or HTTP level failure. Holds the underlying error text.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body isn't valid JSON.
    #[error("couldn't decode the response: {0}")]
    ResponseDecode(#[from] serde_json::Error),

    /// The envelope being followed carries no `pagination` object.
    #[error("the response doesn't support pagination")]
    PaginationUnsupported,

    /// The token endpoint answered with an OAuth error document.
    #[error("OAuth exchange was rejected ({error_type}): {message}")]
    OAuth { error_type: String, message: String },
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::InvalidConfiguration(format!("malformed URL ({})", e))
    }
}
