// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

use crate::{
    client::{count, Client},
    request::Params,
    transport::Transport,
    Error, Result,
};

use serde_json::Value;

impl<T: Transport> Client<T> {
    pub fn search_tags(&self, query: &str) -> Result<Value> {
        let mut params = Params::new();
        params.insert("q", query);
        self.get("tags/search", false, &params)
    }

    pub fn tag(&self, name: &str) -> Result<Value> {
        self.get(&format!("tags/{}", tag_name(name)?), false, &Params::new())
    }

    /// Recently tagged media.
    pub fn tag_media(&self, name: &str, limit: Option<u32>) -> Result<Value> {
        self.get(&format!("tags/{}/media/recent", tag_name(name)?), false, &count(limit))
    }
}

/// Accepts names with or without the leading `#`.
fn tag_name(name: &str) -> Result<&str> {
    let name = name.strip_prefix('#').unwrap_or(name);
    if name.is_empty() || name.contains('/') {
        return Err(Error::InvalidParameter(format!("invalid tag name \"{}\"", name)));
    }
    Ok(name)
}
