use crate::structures::listing::Listing;
use crate::structures::value::{Fields, Hydrated};

/// Any entity without a dedicated type: trophies, wiki pages, mod actions, live updates, and kinds
/// Reddit adds in the future.
#[derive(Debug, Clone, PartialEq)]
pub struct RedditContent {
    /// The type name the factory was asked for, e.g. `Trophy` or `RedditContent`.
    pub type_name: String,
    /// The raw fields.
    pub fields: Fields,
    /// `true` if this came from an API record.
    pub has_fetched: bool,
    /// Replies attached by the reply-tree builder.
    pub replies: Option<Listing>,
}

impl RedditContent {
    /// Internal method. Generic content is built by the `ObjectFactory`.
    pub fn new(type_name: &str, data: Hydrated, has_fetched: bool) -> RedditContent {
        RedditContent {
            type_name: type_name.to_owned(),
            fields: data.into_fields(),
            has_fetched: has_fetched,
            replies: None,
        }
    }
}
