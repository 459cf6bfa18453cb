// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! OAuth2 authorization-code flow.

use crate::{
    client::Client,
    config::{merge_scope, ClientConfig, Credentials, Scope},
    request::{Method, Params, RequestSpec},
    transport::Transport,
    Error, Result,
};

use std::{fmt, io::{self, BufRead, Write}};
use serde::Deserialize;
use url::form_urlencoded;

/// User access token, as used by authenticated calls.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are credentials, keep them out of logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        AccessToken(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        AccessToken(token.to_string())
    }
}

impl From<OAuthToken> for AccessToken {
    fn from(token: OAuthToken) -> Self {
        AccessToken(token.access_token)
    }
}

impl From<&OAuthToken> for AccessToken {
    fn from(token: &OAuthToken) -> Self {
        AccessToken(token.access_token.clone())
    }
}

/// Result of exchanging an authorization code.
#[derive(Clone, Debug, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub user: Option<OAuthUser>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct OAuthUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Deserialize)]
struct OAuthErrorResponse {
    error_type: String,
    error_message: String,
}

impl ClientConfig {
    /// Builds the OAuth login URL using the configured scope.
    pub fn login_url(&self, state: Option<&str>) -> Result<String> {
        self.build_login_url(self.scope(), state)
    }

    /// Builds the OAuth login URL requesting `scope` (merged with the default one)
    /// instead of the configured scope. An empty `scope` falls back to the configured one.
    pub fn login_url_with_scope<I, S>(&self, scope: I, state: Option<&str>) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scope = scope.into_iter().peekable();
        if scope.peek().is_none() {
            return self.login_url(state);
        }
        self.build_login_url(&merge_scope(scope)?, state)
    }

    fn build_login_url(&self, scope: &[Scope], state: Option<&str>) -> Result<String> {
        let callback_url = match self.credentials() {
            Credentials::Confidential { callback_url, .. } => callback_url,
            Credentials::Public => return Err(Error::InvalidConfiguration(
                "a callback URL is required to log in".into()
            )),
        };

        let scope: Vec<_> = scope.iter().map(Scope::as_str).collect();
        let mut url = format!(
            "{}?client_id={}&redirect_uri={}&scope={}&response_type=code",
            self.endpoints().authorize(),
            encode(self.api_key()),
            encode(callback_url),
            scope.join("+"),
        );
        if let Some(state) = state {
            url.push_str("&state=");
            url.push_str(&encode(state));
        }
        Ok(url)
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

impl<T: Transport> Client<T> {
    /// Exchanges the authorization code received on the callback URL for a token.
    pub fn exchange_code(&self, code: &str) -> Result<OAuthToken> {
        let request = {
            let config = self.config();
            let (api_secret, callback_url) = match config.credentials() {
                Credentials::Confidential { api_secret, callback_url } => (api_secret, callback_url),
                Credentials::Public => return Err(Error::InvalidConfiguration(
                    "an API secret is required to exchange a code".into()
                )),
            };

            let mut params = Params::new();
            params
                .insert("grant_type", "authorization_code")
                .insert("client_id", config.api_key())
                .insert("client_secret", api_secret)
                .insert("redirect_uri", callback_url)
                .insert("code", code);

            RequestSpec {
                method: Method::Post,
                url: config.endpoints().token().clone(),
                body: Some(params.encode()),
            }
        };

        tracing::debug!(endpoint = %request.url, "exchanging an authorization code");
        let response = self.execute(&request)?;

        if let Ok(e) = serde_json::from_value::<OAuthErrorResponse>(response.clone()) {
            return Err(Error::OAuth { error_type: e.error_type, message: e.error_message });
        }
        Ok(serde_json::from_value(response)?)
    }

    /// Exchanges the code and stores the received token for subsequent calls.
    pub fn authorize(&self, code: &str) -> Result<OAuthToken> {
        let token = self.exchange_code(code)?;
        self.set_access_token(&token);
        Ok(token)
    }
}

/// Opens the login page and asks the user to paste the code
/// from the callback URL to the standard input.
pub fn request_code(login_url: &str) -> io::Result<String> {
    println!("Opening the authorization page...");
    if let Err(e) = open::that(login_url) {
        eprintln!("Failed to open a URL: {}", e);
        println!("Follow this link manually to perform the authorization: {}", login_url);
    }

    print!("Enter the authorization code: ");
    io::stdout().flush()?;
    read_code(io::stdin().lock())
}

fn read_code(mut input: impl BufRead) -> io::Result<String> {
    let mut code = String::new();
    input.read_line(&mut code)?;

    let code = code.trim();
    if code.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "authorization code is empty"));
    }
    Ok(code.to_string())
}

#[cfg(test)]
mod tests {
    use super::read_code;
    use crate::config::ClientConfig;
    use std::io::{self, BufReader, Read};

    struct BrokenTerminal;

    impl Read for BrokenTerminal {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal is gone"))
        }
    }

    #[test]
    fn code_is_read_from_input() {
        assert_eq!(read_code("  abc123 \n".as_bytes()).unwrap(), "abc123");

        let err = read_code("\n".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        let err = read_code(BufReader::new(BrokenTerminal)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn login_url_with_default_scope() {
        let config = ClientConfig::new("k", "s", "https://cb").unwrap();
        assert_eq!(
            config.login_url(None).unwrap(),
            "https://api.instagram.com/oauth/authorize?client_id=k\
            &redirect_uri=https%3A%2F%2Fcb&scope=basic&response_type=code",
        );
    }

    #[test]
    fn login_url_with_extra_scope_and_state() {
        let config = ClientConfig::new("k", "s", "https://cb/ret?x=1").unwrap();
        let url = config.login_url_with_scope(["likes", "comments"], Some("a b")).unwrap();
        assert_eq!(
            url,
            "https://api.instagram.com/oauth/authorize?client_id=k\
            &redirect_uri=https%3A%2F%2Fcb%2Fret%3Fx%3D1&scope=likes+comments+basic\
            &response_type=code&state=a+b",
        );

        let empty: [&str; 0] = [];
        assert_eq!(
            config.login_url_with_scope(empty, None).unwrap(),
            config.login_url(None).unwrap(),
        );
        assert!(config.login_url_with_scope(["dance"], None).is_err());
    }

    #[test]
    fn public_config_cannot_log_in() {
        let config = ClientConfig::public("k").unwrap();
        assert!(config.login_url(None).is_err());
    }
}
