// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

#![allow(dead_code)]

use std::time::Duration;
use httpmock::MockServer;
use instagram_client::{Client, ClientConfig, Endpoints, HttpConfig};

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("key", "secret", "https://cb")
        .expect("Failed to build client configuration.")
        .with_endpoints(endpoints(server))
}

pub fn endpoints(server: &MockServer) -> Endpoints {
    Endpoints::with_origin(&server.base_url()).expect("Mock server URL should be valid.")
}

pub fn client(server: &MockServer) -> Client {
    Client::with_http_config(config(server), http_config()).expect("Failed to build HTTP client.")
}

pub fn authenticated_client(server: &MockServer) -> Client {
    let client = client(server);
    client.set_access_token("t0k");
    client
}

pub fn http_config() -> HttpConfig {
    HttpConfig {
        timeout: Duration::from_secs(5),
        batch_concurrency: 4,
        ..HttpConfig::default()
    }
}
