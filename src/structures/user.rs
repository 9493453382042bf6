use serde::ser::{Serialize, Serializer};

use crate::structures::listing::Listing;
use crate::structures::thing::serialize_node;
use crate::structures::value::{str_field, Fields, Hydrated};
use crate::traits::Created;

/// A Reddit user. Users referenced from another object (e.g. the `author` of a comment) are stubs
/// that only know their `name`; `has_fetched` tells the two apart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RedditUser {
    /// The raw fields (`name`, `link_karma`, `comment_karma`, ...).
    pub fields: Fields,
    /// `false` for a stub created from a name.
    pub has_fetched: bool,
    /// Replies attached by the reply-tree builder.
    pub replies: Option<Listing>,
}

impl RedditUser {
    /// Internal method. Users are built by the `ObjectFactory`.
    pub fn new(data: Hydrated, has_fetched: bool) -> RedditUser {
        RedditUser {
            fields: data.into_fields(),
            has_fetched: has_fetched,
            replies: None,
        }
    }

    /// The username, not including the leading `/u/`.
    pub fn name(&self) -> Option<&str> {
        str_field(&self.fields, "name")
    }

    /// Gets the user's link karma, if this user has been fetched.
    pub fn link_karma(&self) -> Option<i64> {
        self.fields.get("link_karma").and_then(Hydrated::as_i64)
    }

    /// Gets the user's comment karma, if this user has been fetched.
    pub fn comment_karma(&self) -> Option<i64> {
        self.fields.get("comment_karma").and_then(Hydrated::as_i64)
    }
}

impl Created for RedditUser {
    fn created(&self) -> Option<i64> {
        self.fields.get("created").and_then(Hydrated::as_timestamp)
    }

    fn created_utc(&self) -> Option<i64> {
        self.fields.get("created_utc").and_then(Hydrated::as_timestamp)
    }
}

impl Serialize for RedditUser {
    /// A stub serializes back to the bare name it was created from.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        match self.name() {
            Some(name) if !self.has_fetched => serializer.serialize_str(name),
            _ => serialize_node(&self.fields, &[("replies", self.replies.as_ref())], serializer),
        }
    }
}
