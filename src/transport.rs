// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! Executes requests and decodes JSON responses.

use crate::{
    config::HttpConfig,
    request::{Method, RequestSpec},
    Error, Result,
};

use reqwest::{
    blocking,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_json::Value;

/// Performs a single blocking round trip.
///
/// Implementors must fail with [Error::Transport] when no usable response arrives
/// and with [Error::ResponseDecode] when the body isn't JSON.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &RequestSpec) -> Result<Value>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &RequestSpec) -> Result<Value> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &RequestSpec) -> Result<Value> {
        (**self).execute(request)
    }
}

/// [Transport] backed by the blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<HttpTransport> {
        if config.accept_invalid_certs {
            tracing::warn!("TLS certificate verification is disabled");
        }

        let client = blocking::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(HttpTransport { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: blocking::Client) -> HttpTransport {
        HttpTransport { client }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &RequestSpec) -> Result<Value> {
        let builder = match request.method {
            Method::Get => self.client.get(request.url.clone()),
            Method::Post => self.client.post(request.url.clone()),
            Method::Delete => self.client.delete(request.url.clone()),
        };
        let mut builder = builder.header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status();
        tracing::trace!(method = %request.method, path = request.path(), %status, "response received");

        let body = response.text()?;
        decode(status, &body)
    }
}

/// Decodes a response body. An error status without a JSON body is a transport
/// failure; an error status with a JSON body is passed through, since the API
/// describes failures in the envelope's `meta` object.
pub(crate) fn decode(status: reqwest::StatusCode, body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return if status.is_success() {
            Ok(Value::Null)
        } else {
            Err(Error::Transport(format!("HTTP {} with an empty body", status)))
        };
    }
    match serde_json::from_str(body) {
        Ok(value) => Ok(value),
        Err(e) if !status.is_success() => {
            Err(Error::Transport(format!("HTTP {} with a non-JSON body ({})", status, e)))
        }
        Err(e) => Err(e.into()),
    }
}
