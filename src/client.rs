// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

use crate::{
    auth::AccessToken,
    config::{ClientConfig, HttpConfig},
    request::{self, Method, Params, RequestSpec},
    transport::{HttpTransport, Transport},
    Result,
};

use parking_lot::{RwLock, RwLockReadGuard};
use serde_json::Value;

/// Entry point for all API calls.
///
/// The configuration sits behind a lock, so a client shared between threads
/// (e.g. through `Arc`) may still have its access token replaced.
pub struct Client<T = HttpTransport> {
    config: RwLock<ClientConfig>,
    transport: T,
    batch_concurrency: usize,
}

impl Client<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Client<HttpTransport>> {
        Self::with_http_config(config, HttpConfig::default())
    }

    pub fn with_http_config(config: ClientConfig, http: HttpConfig) -> Result<Client<HttpTransport>> {
        let transport = HttpTransport::new(&http)?;
        let mut client = Client::with_transport(config, transport);
        client.batch_concurrency = http.batch_concurrency.max(1);
        Ok(client)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Client<T> {
        Client {
            config: RwLock::new(config),
            transport,
            batch_concurrency: num_cpus::get(),
        }
    }

    pub fn config(&self) -> RwLockReadGuard<'_, ClientConfig> {
        self.config.read()
    }

    /// Applies `update` to the configuration, e.g. to change the scope.
    pub fn update_config<R>(&self, update: impl FnOnce(&mut ClientConfig) -> R) -> R {
        update(&mut self.config.write())
    }

    pub fn access_token(&self) -> Option<String> {
        self.config.read().access_token().map(String::from)
    }

    /// Accepts a raw token string or an [OAuthToken][crate::auth::OAuthToken].
    pub fn set_access_token(&self, token: impl Into<AccessToken>) {
        self.config.write().set_access_token(token);
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn batch_concurrency(&self) -> usize {
        self.batch_concurrency
    }

    /// Builds a request for the resource `path` and executes it.
    pub fn make_call(
        &self,
        path: &str,
        authenticated: bool,
        params: &Params,
        method: Method,
    ) -> Result<Value> {
        let request = request::build(&self.config.read(), path, authenticated, params, method)?;
        self.execute(&request)
    }

    pub(crate) fn get(&self, path: &str, authenticated: bool, params: &Params) -> Result<Value> {
        self.make_call(path, authenticated, params, Method::Get)
    }

    pub(crate) fn execute(&self, request: &RequestSpec) -> Result<Value> {
        tracing::debug!(method = %request.method, path = request.path(), "dispatching a request");
        self.transport.execute(request)
    }
}

/// Parameters holding only an optional `count`.
pub(crate) fn count(limit: Option<u32>) -> Params {
    let mut params = Params::new();
    params.insert_opt("count", limit);
    params
}
