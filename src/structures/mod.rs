/// Comment that represents a reply to a submission (or another comment).
pub mod comment;
/// Generic content for entity kinds without a dedicated type.
pub mod content;
/// Ordered, lazily-fetched lists of entities.
pub mod listing;
/// Structures for private messages.
pub mod messages;
/// Placeholders for children that have not been fetched.
pub mod more;
/// Structure representing a link post or self post (a submission).
pub mod submission;
/// Structures representing subreddits.
pub mod subreddit;
/// The closed set of entity kinds.
pub mod thing;
/// Structures representing users.
pub mod user;
/// JSON values with typed entities in them.
pub mod value;
