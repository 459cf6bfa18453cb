// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

use crate::{
    client::{count, Client},
    request::Params,
    transport::Transport,
    Result,
};

use std::fmt::Display;
use serde_json::Value;

/// ID which refers to the owner of the access token.
pub const SELF: &str = "self";

impl<T: Transport> Client<T> {
    pub fn search_users(&self, query: &str, limit: Option<u32>) -> Result<Value> {
        let mut params = count(limit);
        params.insert("q", query);
        self.get("users/search", false, &params)
    }

    /// Information about the owner of the access token.
    pub fn current_user(&self) -> Result<Value> {
        self.get("users/self", true, &Params::new())
    }

    pub fn user(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("users/{}", id), false, &Params::new())
    }

    pub fn user_feed(&self, limit: Option<u32>) -> Result<Value> {
        self.get("users/self/feed", true, &count(limit))
    }

    /// Recent media of a user. Only [SELF] requires the access token.
    pub fn user_media(&self, id: impl Display, limit: Option<u32>) -> Result<Value> {
        let id = id.to_string();
        self.get(&format!("users/{}/media/recent", id), id == SELF, &count(limit))
    }

    /// Media liked by the owner of the access token.
    pub fn user_likes(&self, limit: Option<u32>) -> Result<Value> {
        self.get("users/self/media/liked", true, &count(limit))
    }

    /// Users followed by the user.
    pub fn user_follows(&self, id: impl Display, limit: Option<u32>) -> Result<Value> {
        self.get(&format!("users/{}/follows", id), true, &count(limit))
    }

    /// Users following the user.
    pub fn user_followers(&self, id: impl Display, limit: Option<u32>) -> Result<Value> {
        self.get(&format!("users/{}/followed-by", id), true, &count(limit))
    }
}

#[cfg(test)]
mod tests {
    use crate::{client::Client, config::ClientConfig, request::RequestSpec, transport::Transport, Error, Result};
    use parking_lot::Mutex;
    use serde_json::Value;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Transport for Recorder {
        fn execute(&self, request: &RequestSpec) -> Result<Value> {
            self.0.lock().push(request.url.to_string());
            Ok(Value::Null)
        }
    }

    #[test]
    fn only_own_media_is_authenticated() {
        let client = Client::with_transport(ClientConfig::public("k").unwrap(), Recorder::default());
        client.user_media(42, None).unwrap();
        assert!(matches!(client.user_media(super::SELF, None), Err(Error::AuthenticationRequired)));

        client.set_access_token("t");
        client.user_media("self", Some(3)).unwrap();
        assert_eq!(*client.transport().0.lock(), [
            "https://api.instagram.com/v1/users/42/media/recent?client_id=k",
            "https://api.instagram.com/v1/users/self/media/recent?access_token=t&count=3",
        ]);
    }

    #[test]
    fn search_users_without_limit() {
        let client = Client::with_transport(ClientConfig::public("k").unwrap(), Recorder::default());
        client.search_users("jack", None).unwrap();
        assert!(matches!(client.search_users("jack", Some(0)), Err(Error::InvalidParameter(_))));
        assert_eq!(*client.transport().0.lock(), [
            "https://api.instagram.com/v1/users/search?client_id=k&q=jack",
        ]);
    }
}
