// Copyright © 2022 Nikita Dudko. All rights reserved.
// Contacts: <nikita.dudko.95@gmail.com>
// Licensed under the MIT License.

use crate::{
    client::Client,
    request::{Method, Params},
    transport::Transport,
    Error, Result,
};

use std::{fmt::{self, Display}, str::FromStr};
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationshipAction {
    Follow,
    Unfollow,
    Block,
    Unblock,
    Approve,
    Deny,
}

impl RelationshipAction {
    pub const ALL: [RelationshipAction; 6] = [
        RelationshipAction::Follow,
        RelationshipAction::Unfollow,
        RelationshipAction::Block,
        RelationshipAction::Unblock,
        RelationshipAction::Approve,
        RelationshipAction::Deny,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipAction::Follow => "follow",
            RelationshipAction::Unfollow => "unfollow",
            RelationshipAction::Block => "block",
            RelationshipAction::Unblock => "unblock",
            RelationshipAction::Approve => "approve",
            RelationshipAction::Deny => "deny",
        }
    }
}

impl FromStr for RelationshipAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RelationshipAction::ALL
            .iter()
            .find(|action| action.as_str() == s)
            .copied()
            .ok_or_else(|| Error::InvalidParameter(format!("unsupported relationship action \"{}\"", s)))
    }
}

impl Display for RelationshipAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Transport> Client<T> {
    /// Relationship between the owner of the access token and the user.
    pub fn user_relationship(&self, id: impl Display) -> Result<Value> {
        self.get(&format!("users/{}/relationship", id), true, &Params::new())
    }

    /// Performs `action` (follow, unfollow, block, unblock, approve or deny)
    /// on the user.
    pub fn modify_relationship(&self, action: &str, id: impl Display) -> Result<Value> {
        let action: RelationshipAction = action.parse()?;
        let id = id.to_string();
        if id.is_empty() {
            return Err(Error::InvalidParameter("target user ID is empty".into()));
        }

        let mut params = Params::new();
        params.insert("action", action);
        self.make_call(&format!("users/{}/relationship", id), true, &params, Method::Post)
    }
}
