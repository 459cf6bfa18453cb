// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! Blocking client for the [Instagram API](https://www.instagram.com/developer/) v1.
//!
//! Every endpoint is a method of [Client] returning the decoded JSON envelope as is.
//! Follow up a paginated envelope with [Client::next_page] or [Client::pages].
//!
//! ```no_run
//! use instagram_client::{Client, ClientConfig};
//!
//! # fn main() -> instagram_client::Result<()> {
//! let config = ClientConfig::new("app-id", "app-secret", "https://example.com/callback")?;
//! println!("Log in at {}", config.login_url(None)?);
//!
//! let client = Client::new(config)?;
//! client.authorize("code-from-the-callback")?;
//!
//! let feed = client.user_feed(Some(20))?;
//! for page in client.pages(feed, Some(20)).take(3) {
//!     println!("{}", page?["data"]);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod batch;
pub mod client;
pub mod config;
pub mod error;
pub mod location;
pub mod media;
pub mod pagination;
pub mod relationship;
pub mod request;
pub mod tag;
pub mod transport;
pub mod user;

pub use client::Client;
pub use config::{ClientConfig, Credentials, Endpoints, HttpConfig, Scope, Settings};
pub use error::{Error, Result};
pub use request::{Method, Params, RequestSpec};
pub use transport::{HttpTransport, Transport};
