// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! Following the `pagination` object of a response envelope.
//!
//! Time-ordered feeds continue with `next_max_id` (sent back as `max_id`),
//! relationship lists continue with `next_cursor` (sent back as `cursor`).
//! When an envelope carries both, `next_max_id` wins. An envelope with
//! neither is the last page.

use crate::{client::Client, request::{Method, Params}, transport::Transport, Error, Result};

use serde_json::Value;
use url::Url;

/// Request which fetches the next page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Continuation {
    /// Resource path relative to the API base.
    pub path: String,
    pub authenticated: bool,
    pub params: Params,
}

/// Derives the request for the page following `envelope`.
///
/// Returns `None` when there are no more pages.
pub fn continuation(envelope: &Value, limit: Option<u32>, api_base: &Url) -> Result<Option<Continuation>> {
    let pagination = match envelope.get("pagination") {
        Some(pagination @ Value::Object(_)) => pagination,
        _ => return Err(Error::PaginationUnsupported),
    };
    let next_url = match pagination.get("next_url").and_then(Value::as_str) {
        Some(url) if !url.is_empty() => url,
        _ => return Ok(None),
    };

    let next_url = Url::parse(next_url)
        .map_err(|e| Error::InvalidParameter(format!("malformed next_url ({})", e)))?;
    // Without a query there is no cursor to follow.
    if next_url.query().is_none() {
        return Ok(None);
    }

    let path = relative_path(&next_url, api_base).ok_or_else(|| Error::InvalidParameter(
        format!("next_url {} is outside of the API base {}", next_url.path(), api_base)
    ))?;
    let authenticated = next_url.query_pairs().any(|(key, _)| key == "access_token");

    let mut params = Params::new();
    if let Some(max_id) = pagination.get("next_max_id").and_then(cursor_value) {
        params.insert("max_id", max_id);
    } else if let Some(cursor) = pagination.get("next_cursor").and_then(cursor_value) {
        params.insert("cursor", cursor);
    } else {
        // Nothing to move the position forward, the same page would come back.
        return Ok(None);
    }
    params.insert_opt("count", limit);

    Ok(Some(Continuation { path, authenticated, params }))
}

fn relative_path(url: &Url, base: &Url) -> Option<String> {
    if url.origin() != base.origin() {
        return None;
    }
    url.path()
        .strip_prefix(base.path())
        .filter(|path| !path.is_empty())
        .map(String::from)
}

/// Cursors come as strings or numbers depending on the endpoint.
fn cursor_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl<T: Transport> Client<T> {
    /// Fetches the page following `envelope`, or `None` if it was the last one.
    pub fn next_page(&self, envelope: &Value, limit: Option<u32>) -> Result<Option<Value>> {
        let api_base = self.config().endpoints().api().clone();
        match continuation(envelope, limit, &api_base)? {
            Some(next) => {
                tracing::debug!(path = %next.path, "following pagination");
                self.make_call(&next.path, next.authenticated, &next.params, Method::Get).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Iterates over the pages following `first`. Iteration stops after the last
    /// page or right after the first error.
    pub fn pages(&self, first: Value, limit: Option<u32>) -> Pages<'_, T> {
        Pages { client: self, current: Some(first), limit }
    }
}

/// Iterator returned by [Client::pages].
pub struct Pages<'a, T> {
    client: &'a Client<T>,
    current: Option<Value>,
    limit: Option<u32>,
}

impl<T: Transport> Iterator for Pages<'_, T> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        match self.client.next_page(&current, self.limit) {
            Ok(Some(page)) => {
                self.current = Some(page.clone());
                Some(Ok(page))
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
