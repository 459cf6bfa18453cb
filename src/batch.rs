// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

//! Same request on behalf of several users at once.

use crate::{
    client::{self, Client},
    request::{self, Method, Params},
    transport::Transport,
    Error, Result,
};

use std::{fmt::Display, sync::{mpsc, Arc}};
use serde_json::Value;
use threadpool::ThreadPool;

/// Outcome of a batch call for one access token.
#[derive(Debug)]
pub struct BatchResult {
    pub token: String,
    pub result: Result<Value>,
}

impl<T: Transport + 'static> Client<T> {
    /// Performs an authenticated GET of `path` once per token.
    ///
    /// Requests run on a thread pool bounded by
    /// [HttpConfig::batch_concurrency][crate::config::HttpConfig::batch_concurrency].
    /// Results follow the order of `tokens` and a failure affects only its own token.
    pub fn batch<I, S>(self: &Arc<Self>, tokens: I, path: &str, params: &Params) -> Vec<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Vec::new();
        }

        let pool = ThreadPool::new(self.batch_concurrency().min(tokens.len()));
        let (sender, receiver) = mpsc::channel();
        tracing::debug!(path, tokens = tokens.len(), threads = pool.max_count(), "starting a batch call");

        for (index, token) in tokens.iter().enumerate() {
            let (client, sender) = (Arc::clone(self), sender.clone());
            let (token, path, params) = (token.clone(), path.to_string(), params.clone());
            pool.execute(move || {
                let result = client.call_as(&token, &path, &params);
                // The receiver outlives the pool, so sending can't fail.
                sender.send((index, result)).ok();
            });
        }
        drop(sender);
        pool.join();

        let mut results: Vec<Option<Result<Value>>> = tokens.iter().map(|_| None).collect();
        for (index, result) in receiver {
            results[index] = Some(result);
        }
        tokens
            .into_iter()
            .zip(results)
            .map(|(token, result)| BatchResult {
                token,
                // A job only goes missing if it panicked.
                result: result.unwrap_or_else(|| Err(Error::Transport("request was aborted".into()))),
            })
            .collect()
    }

    /// `users/self` of every token owner.
    pub fn batch_current_users<I, S>(self: &Arc<Self>, tokens: I) -> Vec<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.batch(tokens, "users/self", &Params::new())
    }

    pub fn batch_user_media<I, S>(self: &Arc<Self>, tokens: I, id: impl Display, limit: Option<u32>) -> Vec<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.batch(tokens, &format!("users/{}/media/recent", id), &client::count(limit))
    }

    pub fn batch_user_followers<I, S>(self: &Arc<Self>, tokens: I, id: impl Display, limit: Option<u32>) -> Vec<BatchResult>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.batch(tokens, &format!("users/{}/followed-by", id), &client::count(limit))
    }

    fn call_as(&self, token: &str, path: &str, params: &Params) -> Result<Value> {
        let request = request::build_with_token(&self.config(), path, Some(token), true, params, Method::Get)?;
        self.execute(&request)
    }
}
