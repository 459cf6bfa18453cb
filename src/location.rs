// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

use crate::{client::Client, media::coordinates, request::Params, transport::Transport, Result};

use std::fmt::Display;
use serde_json::Value;

impl<T: Transport> Client<T> {
    pub fn location(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("locations/{}", id), false, &Params::new())
    }

    /// Recent media from the location.
    pub fn location_media(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("locations/{}/media/recent", id), false, &Params::new())
    }

    /// Locations within `distance` meters (5 km at most, 1 km by default) from the point.
    pub fn search_locations(&self, lat: f64, lng: f64, distance: Option<u32>) -> Result<Value> {
        self.get("locations/search", false, &coordinates(lat, lng, distance)?)
    }
}
