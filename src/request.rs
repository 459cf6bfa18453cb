// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! Turns a resource path and its parameters into a fully qualified request.

use crate::{config::ClientConfig, Error, Result};

use std::{collections::BTreeMap, fmt};
use url::{form_urlencoded, Url};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request parameters. Keys are kept sorted so encoding is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Params {
        Params::default()
    }

    /// Accepts anything printable, so both strings and numbers fit.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Params {
        self.0.insert(key.into(), value.to_string());
        self
    }

    /// Same as [insert][Params::insert], but skips `None`.
    pub fn insert_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) -> &mut Params {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Encodes as `application/x-www-form-urlencoded`.
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    pub fn decode(encoded: &str) -> Params {
        Params(form_urlencoded::parse(encoded.as_bytes()).into_owned().collect())
    }

    /// Rejects a `count` lower than 1, which would silently request zero records.
    fn validate(&self) -> Result<()> {
        if let Some(count) = self.get("count") {
            match count.parse::<i64>() {
                Ok(count) if count >= 1 => {}
                _ => return Err(Error::InvalidParameter(format!(
                    "count must be a positive number, got \"{}\"", count
                ))),
            }
        }
        Ok(())
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Params(iter.into_iter().map(|(key, value)| (key.into(), value.to_string())).collect())
    }
}

/// Fully qualified request, ready to be executed by a [Transport][crate::transport::Transport].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: Method,
    /// Includes the credential parameter and, unless it's a POST, the encoded parameters.
    pub url: Url,
    /// Encoded parameters of a POST request.
    pub body: Option<String>,
}

impl RequestSpec {
    /// URL path, for logging. Unlike the query, it carries no credentials.
    pub fn path(&self) -> &str {
        self.url.path()
    }
}

/// Assembles a request for the resource `path`.
///
/// Authenticated requests carry `access_token`, the rest carry `client_id`.
/// Parameters go to the query string, except for POST where they become the body.
pub fn build(
    config: &ClientConfig,
    path: &str,
    authenticated: bool,
    params: &Params,
    method: Method,
) -> Result<RequestSpec> {
    let token = if authenticated { config.access_token() } else { None };
    build_with_token(config, path, token, authenticated, params, method)
}

/// Like [build], but authenticates with `token` instead of the configured one.
pub(crate) fn build_with_token(
    config: &ClientConfig,
    path: &str,
    token: Option<&str>,
    authenticated: bool,
    params: &Params,
    method: Method,
) -> Result<RequestSpec> {
    let credential = if authenticated {
        match token {
            Some(token) if !token.is_empty() => ("access_token", token),
            _ => return Err(Error::AuthenticationRequired),
        }
    } else {
        ("client_id", config.api_key())
    };
    params.validate()?;

    let mut url = resource_url(config.endpoints().api(), path)?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair(credential.0, credential.1);
        if method != Method::Post {
            query.extend_pairs(params.iter());
        }
    }

    let body = match method {
        Method::Post => Some(params.encode()),
        Method::Get | Method::Delete => None,
    };
    Ok(RequestSpec { method, url, body })
}

fn resource_url(base: &Url, path: &str) -> Result<Url> {
    let path = path.trim_start_matches('/');
    if path.is_empty() || path.contains(|c: char| c == '?' || c == '#') {
        return Err(Error::InvalidParameter(format!("malformed resource path \"{}\"", path)));
    }
    if path.split('/').any(|segment| segment == ".." || segment == ".") {
        return Err(Error::InvalidParameter(format!("relative segments aren't allowed in \"{}\"", path)));
    }
    base.join(path)
        .map_err(|e| Error::InvalidParameter(format!("malformed resource path \"{}\" ({})", path, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn config() -> ClientConfig {
        ClientConfig::new("key", "secret", "https://cb").unwrap()
    }

    #[test]
    fn unauthenticated_get_carries_client_id() {
        let mut params = Params::new();
        params.insert("q", "jack").insert("count", 5);

        let request = build(&config(), "users/search", false, &params, Method::Get).unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url.as_str(),
            "https://api.instagram.com/v1/users/search?client_id=key&count=5&q=jack",
        );
        assert_eq!(request.body, None);
    }

    #[test]
    fn authenticated_requires_token() {
        let mut config = config();
        for method in [Method::Get, Method::Post, Method::Delete] {
            for path in ["users/self", "media/1/likes"] {
                assert!(matches!(
                    build(&config, path, true, &Params::new(), method),
                    Err(Error::AuthenticationRequired)
                ));
            }
        }

        config.set_access_token("t0k");
        let request = build(&config, "users/self/feed", true, &Params::new(), Method::Get).unwrap();
        assert_eq!(request.url.as_str(), "https://api.instagram.com/v1/users/self/feed?access_token=t0k");
    }

    #[test]
    fn post_puts_params_to_body() {
        let mut config = config();
        config.set_access_token("t");
        let params: Params = [("text", "nice shot!")].into_iter().collect();

        let request = build(&config, "media/7/comments", true, &params, Method::Post).unwrap();
        assert_eq!(request.url.query(), Some("access_token=t"));
        assert_eq!(request.body.as_deref(), Some("text=nice+shot%21"));

        let request = build(&config, "media/7/likes", true, &Params::new(), Method::Post).unwrap();
        assert_eq!(request.body.as_deref(), Some(""));
    }

    #[test]
    fn delete_has_no_body() {
        let mut config = config();
        config.set_access_token("t");
        let request = build(&config, "media/7/comments/9", true, &Params::new(), Method::Delete).unwrap();
        assert_eq!(request.body, None);
        assert_eq!(request.path(), "/v1/media/7/comments/9");
    }

    #[test]
    fn count_must_be_positive() {
        for count in ["0", "-3", "many"] {
            let params: Params = [("count", count)].into_iter().collect();
            assert!(matches!(
                build(&config(), "tags/rust/media/recent", false, &params, Method::Get),
                Err(Error::InvalidParameter(_))
            ));
        }
        let params: Params = [("count", 1)].into_iter().collect();
        assert!(build(&config(), "tags/rust/media/recent", false, &params, Method::Get).is_ok());
    }

    #[test]
    fn malformed_paths() {
        for path in ["", "users/self?x=1", "tags/#a", "users/../oauth"] {
            assert!(matches!(
                build(&config(), path, false, &Params::new(), Method::Get),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn query_decodes_to_the_same_params() {
        let params: Params = [
            ("q", "café & bar"),
            ("lat", "48.858844"),
            ("distance", "1000"),
            ("empty", ""),
        ].into_iter().collect();

        let request = build(&config(), "locations/search", false, &params, Method::Get).unwrap();
        let mut decoded = Params::decode(request.url.query().unwrap());
        assert_eq!(decoded.0.remove("client_id").as_deref(), Some("key"));
        assert_eq!(decoded, params);
        assert_eq!(Params::decode(&params.encode()), params);
    }
}
