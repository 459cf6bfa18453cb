// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! Application credentials, permission scopes and endpoint locations.

use crate::{auth::AccessToken, Error, Result};

use std::{env, fmt, str::FromStr, time::Duration};
use serde::Deserialize;
use url::Url;

const API_URL: &str = "https://api.instagram.com/v1/";
const OAUTH_AUTHORIZE_URL: &str = "https://api.instagram.com/oauth/authorize";
const OAUTH_TOKEN_URL: &str = "https://api.instagram.com/oauth/access_token";

/// Permission which an access token may be granted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Basic,
    Likes,
    Comments,
    Relationships,
    PublicContent,
    FollowerList,
}

impl Scope {
    pub const ALL: [Scope; 6] = [
        Scope::Basic,
        Scope::Likes,
        Scope::Comments,
        Scope::Relationships,
        Scope::PublicContent,
        Scope::FollowerList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Basic => "basic",
            Scope::Likes => "likes",
            Scope::Comments => "comments",
            Scope::Relationships => "relationships",
            Scope::PublicContent => "public_content",
            Scope::FollowerList => "follower_list",
        }
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Scope::ALL
            .iter()
            .find(|scope| scope.as_str() == s)
            .copied()
            .ok_or_else(|| Error::InvalidConfiguration(format!("unknown permission scope \"{}\"", s)))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merges the requested scopes with the mandatory [Scope::Basic].
///
/// Order of the requested scopes is kept and duplicates are dropped.
/// Fails if any requested scope isn't a known one.
pub fn merge_scope<I, S>(requested: I) -> Result<Vec<Scope>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut merged = Vec::new();
    for name in requested {
        let scope: Scope = name.as_ref().parse()?;
        if !merged.contains(&scope) {
            merged.push(scope);
        }
    }
    if !merged.contains(&Scope::Basic) {
        merged.push(Scope::Basic);
    }
    Ok(merged)
}

/// What the application is able to access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credentials {
    /// Only the API key is known, so only public data can be requested.
    Public,
    /// Full access: users can log in and authenticated calls become possible.
    Confidential {
        api_secret: String,
        callback_url: String,
    },
}

/// Locations of the API and the OAuth endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    api: Url,
    authorize: Url,
    token: Url,
}

impl Endpoints {
    pub fn new(api: &str, authorize: &str, token: &str) -> Result<Endpoints> {
        let mut api = Url::parse(api)?;
        // Resource paths are joined relative to the base.
        if !api.path().ends_with('/') {
            let path = format!("{}/", api.path());
            api.set_path(&path);
        }
        Ok(Endpoints {
            api,
            authorize: Url::parse(authorize)?,
            token: Url::parse(token)?,
        })
    }

    /// Replaces only the host part of all endpoints, keeping their paths.
    /// Handy to point the client at a proxy or a mock server.
    pub fn with_origin(origin: &str) -> Result<Endpoints> {
        let origin = Url::parse(origin)?;
        let origin = origin.as_str().trim_end_matches('/');
        Endpoints::new(
            &format!("{}/v1/", origin),
            &format!("{}/oauth/authorize", origin),
            &format!("{}/oauth/access_token", origin),
        )
    }

    pub fn api(&self) -> &Url {
        &self.api
    }

    pub fn authorize(&self) -> &Url {
        &self.authorize
    }

    pub fn token(&self) -> &Url {
        &self.token
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            api: Url::parse(API_URL).expect("API URL constant is valid"),
            authorize: Url::parse(OAUTH_AUTHORIZE_URL).expect("authorize URL constant is valid"),
            token: Url::parse(OAUTH_TOKEN_URL).expect("token URL constant is valid"),
        }
    }
}

/// Transport settings. Defaults keep TLS verification on.
#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub connect_timeout: Duration,
    /// Overall limit for a single request, including reading the body.
    pub timeout: Duration,
    /// Disables TLS certificate verification. Only meant for test environments.
    pub accept_invalid_certs: bool,
    pub user_agent: String,
    /// Upper bound of requests running at once in a batch call.
    pub batch_concurrency: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        HttpConfig {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            batch_concurrency: num_cpus::get(),
        }
    }
}

/// Raw configuration values, as they appear in a configuration file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub client_id: String,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub scope: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_key: String,
    credentials: Credentials,
    access_token: Option<AccessToken>,
    scope: Vec<Scope>,
    endpoints: Endpoints,
}

impl ClientConfig {
    /// Configuration allowing users to log in and authenticated calls to be made.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Result<ClientConfig> {
        let (api_secret, callback_url) = (api_secret.into(), callback_url.into());
        if api_secret.is_empty() {
            return Err(Error::InvalidConfiguration("API secret is empty".into()));
        }
        if callback_url.is_empty() {
            return Err(Error::InvalidConfiguration("callback URL is empty".into()));
        }

        let mut config = Self::public(api_key)?;
        config.credentials = Credentials::Confidential { api_secret, callback_url };
        Ok(config)
    }

    /// Configuration for accessing public data only.
    pub fn public(api_key: impl Into<String>) -> Result<ClientConfig> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::InvalidConfiguration("API key is empty".into()));
        }
        Ok(ClientConfig {
            api_key,
            credentials: Credentials::Public,
            access_token: None,
            scope: vec![Scope::Basic],
            endpoints: Endpoints::default(),
        })
    }

    pub fn from_settings(settings: Settings) -> Result<ClientConfig> {
        let mut config = match (settings.client_secret, settings.redirect_uri) {
            (Some(secret), Some(redirect)) => Self::new(settings.client_id, secret, redirect)?,
            (None, None) => Self::public(settings.client_id)?,
            _ => return Err(Error::InvalidConfiguration(
                "client secret and redirect URI must be provided together".into()
            )),
        };
        config.set_scope(&settings.scope)?;
        Ok(config)
    }

    /// Reads `INSTAGRAM_APP_ID`, `INSTAGRAM_APP_SECRET`, `INSTAGRAM_OAUTH_URI`
    /// and `INSTAGRAM_SCOPE` (separated by commas or spaces).
    pub fn from_env() -> Result<ClientConfig> {
        let var = |name: &str| env::var(name).ok().filter(|value| !value.is_empty());

        let client_id = var("INSTAGRAM_APP_ID")
            .ok_or_else(|| Error::InvalidConfiguration("INSTAGRAM_APP_ID isn't set".into()))?;
        let scope = var("INSTAGRAM_SCOPE")
            .map(|value| {
                value
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self::from_settings(Settings {
            client_id,
            client_secret: var("INSTAGRAM_APP_SECRET"),
            redirect_uri: var("INSTAGRAM_OAUTH_URI"),
            scope,
        })
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> ClientConfig {
        self.endpoints = endpoints;
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> Result<()> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(Error::InvalidConfiguration("API key is empty".into()));
        }
        self.api_key = api_key;
        Ok(())
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn api_secret(&self) -> Option<&str> {
        match &self.credentials {
            Credentials::Confidential { api_secret, .. } => Some(api_secret),
            Credentials::Public => None,
        }
    }

    pub fn set_api_secret(&mut self, secret: impl Into<String>) -> Result<()> {
        let secret = secret.into();
        match &mut self.credentials {
            Credentials::Confidential { .. } if secret.is_empty() => {
                Err(Error::InvalidConfiguration("API secret is empty".into()))
            }
            Credentials::Confidential { api_secret, .. } => {
                *api_secret = secret;
                Ok(())
            }
            Credentials::Public => Err(public_only()),
        }
    }

    pub fn callback_url(&self) -> Option<&str> {
        match &self.credentials {
            Credentials::Confidential { callback_url, .. } => Some(callback_url),
            Credentials::Public => None,
        }
    }

    pub fn set_callback_url(&mut self, url: impl Into<String>) -> Result<()> {
        let url = url.into();
        match &mut self.credentials {
            Credentials::Confidential { .. } if url.is_empty() => {
                Err(Error::InvalidConfiguration("callback URL is empty".into()))
            }
            Credentials::Confidential { callback_url, .. } => {
                *callback_url = url;
                Ok(())
            }
            Credentials::Public => Err(public_only()),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(AccessToken::as_str)
    }

    /// Accepts a raw token string or an [OAuthToken][crate::auth::OAuthToken].
    /// An empty token clears the current one.
    pub fn set_access_token(&mut self, token: impl Into<AccessToken>) {
        let token = token.into();
        self.access_token = if token.as_str().is_empty() { None } else { Some(token) };
    }

    pub fn clear_access_token(&mut self) {
        self.access_token = None;
    }

    pub fn scope(&self) -> &[Scope] {
        &self.scope
    }

    /// Replaces the scope with `scope` merged into the default one.
    pub fn set_scope<I, S>(&mut self, scope: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.scope = merge_scope(scope)?;
        Ok(())
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

fn public_only() -> Error {
    Error::InvalidConfiguration("client is configured for public data only".into())
}
