// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

use crate::{
    client::Client,
    request::{Method, Params},
    transport::Transport,
    Error, Result,
};

use std::fmt::Display;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Search radius used when none is given, in meters.
pub const DEFAULT_DISTANCE: u32 = 1000;

impl<T: Transport> Client<T> {
    /// Media taken within `distance` meters (5 km at most) from the point.
    /// Without timestamps the API looks at the last 5 days.
    pub fn search_media(
        &self,
        lat: f64,
        lng: f64,
        distance: Option<u32>,
        min_timestamp: Option<DateTime<Utc>>,
        max_timestamp: Option<DateTime<Utc>>,
    ) -> Result<Value> {
        if let (Some(min), Some(max)) = (min_timestamp, max_timestamp) {
            if min > max {
                return Err(Error::InvalidParameter(
                    "min_timestamp is later than max_timestamp".into()
                ));
            }
        }

        let mut params = coordinates(lat, lng, distance)?;
        params
            .insert_opt("min_timestamp", min_timestamp.map(|date| date.timestamp()))
            .insert_opt("max_timestamp", max_timestamp.map(|date| date.timestamp()));
        self.get("media/search", false, &params)
    }

    pub fn media(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("media/{}", id), false, &Params::new())
    }

    pub fn popular_media(&self) -> Result<Value> {
        self.get("media/popular", false, &Params::new())
    }

    /// Users who have liked the media.
    pub fn media_likes(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("media/{}/likes", id), true, &Params::new())
    }

    pub fn media_comments(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("media/{}/comments", id), false, &Params::new())
    }

    pub fn add_media_comment(&self, id: impl Display, text: &str) -> Result<Value> {
        let mut params = Params::new();
        params.insert("text", text);
        self.make_call(&format!("media/{}/comments", id), true, &params, Method::Post)
    }

    pub fn delete_media_comment(&self, id: impl Display, comment_id: impl Display) -> Result<Value> {
        let path = format!("media/{}/comments/{}", id, comment_id);
        self.make_call(&path, true, &Params::new(), Method::Delete)
    }

    pub fn like_media(&self, id: impl Display) -> Result<Value> {
        self.make_call(&format!("media/{}/likes", id), true, &Params::new(), Method::Post)
    }

    pub fn unlike_media(&self, id: impl Display) -> Result<Value> {
        self.make_call(&format!("media/{}/likes", id), true, &Params::new(), Method::Delete)
    }
}

/// `lat`, `lng` and `distance` parameters shared by media and location search.
pub(crate) fn coordinates(lat: f64, lng: f64, distance: Option<u32>) -> Result<Params> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(Error::InvalidParameter(format!("coordinates ({}, {}) are out of range", lat, lng)));
    }

    let mut params = Params::new();
    params
        .insert("lat", lat)
        .insert("lng", lng)
        .insert("distance", distance.unwrap_or(DEFAULT_DISTANCE));
    Ok(params)
}
