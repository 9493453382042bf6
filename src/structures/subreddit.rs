use serde::ser::{Serialize, Serializer};

use crate::structures::listing::Listing;
use crate::structures::thing::serialize_node;
use crate::structures::value::{str_field, Fields, Hydrated};
use crate::traits::Created;

/// The `Subreddit` struct represents a subreddit. Subreddits referenced from another object (the
/// `subreddit` of a submission, say) are stubs that only know their `display_name`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subreddit {
    /// The raw fields (`display_name`, `subscribers`, ...).
    pub fields: Fields,
    /// `false` for a stub created from a name.
    pub has_fetched: bool,
    /// Replies attached by the reply-tree builder.
    pub replies: Option<Listing>,
}

impl Subreddit {
    /// Internal method. Subreddits are built by the `ObjectFactory`.
    pub fn new(data: Hydrated, has_fetched: bool) -> Subreddit {
        Subreddit {
            fields: data.into_fields(),
            has_fetched: has_fetched,
            replies: None,
        }
    }

    /// The name of the subreddit, not including `/r/`.
    pub fn display_name(&self) -> Option<&str> {
        str_field(&self.fields, "display_name")
    }

    /// The number of subscribers, if this subreddit has been fetched.
    pub fn subscribers(&self) -> Option<i64> {
        self.fields.get("subscribers").and_then(Hydrated::as_i64)
    }
}

impl Created for Subreddit {
    fn created(&self) -> Option<i64> {
        self.fields.get("created").and_then(Hydrated::as_timestamp)
    }

    fn created_utc(&self) -> Option<i64> {
        self.fields.get("created_utc").and_then(Hydrated::as_timestamp)
    }
}

impl Serialize for Subreddit {
    /// A stub serializes back to the bare display name it was created from.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        match self.display_name() {
            Some(name) if !self.has_fetched => serializer.serialize_str(name),
            _ => serialize_node(&self.fields, &[("replies", self.replies.as_ref())], serializer),
        }
    }
}
