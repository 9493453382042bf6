use crate::options::ListingOptions;
use crate::structures::listing::Listing;
use crate::structures::subreddit::Subreddit;
use crate::structures::user::RedditUser;
use crate::structures::value::{str_field, Fields, Hydrated};
use crate::traits::{subreddit_field, user_field, Commentable, Content, Created, Editable,
                    ObjectFactory};

/// A representation of a private message from Reddit.
///
/// Message threads arrive flattened: the replies of a conversation are siblings that point at
/// their parent through `parent_id`. Run `replies::build_replies_tree` over the list to thread
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct PrivateMessage {
    /// The raw fields, with `author` and `subreddit` replaced by stubs.
    pub fields: Fields,
    /// `true` if this came from an API record.
    pub has_fetched: bool,
    /// The replies in this conversation below this message.
    pub replies: Listing,
}

impl PrivateMessage {
    /// Internal method. Messages are built by the `ObjectFactory`. A `replies` listing sent by
    /// Reddit is kept; otherwise the message starts with an empty one.
    pub fn new<F>(data: Hydrated, has_fetched: bool, factory: &F) -> PrivateMessage
        where F: ObjectFactory + ?Sized
    {
        let mut fields = data.into_fields();
        let replies = match fields.remove("replies").and_then(Hydrated::into_listing) {
            Some(listing) => listing,
            None => factory.new_listing(ListingOptions::new()),
        };
        PrivateMessage {
            fields: fields,
            has_fetched: has_fetched,
            replies: replies,
        }
    }

    /// Gets the full name (kind + id, e.g. 't4_a5bzp') of the message this replies to.
    pub fn parent_id(&self) -> Option<&str> {
        str_field(&self.fields, "parent_id")
    }

    /// The subject line.
    pub fn subject(&self) -> Option<&str> {
        str_field(&self.fields, "subject")
    }

    /// The fullname of the first message in the conversation.
    pub fn first_message_name(&self) -> Option<&str> {
        str_field(&self.fields, "first_message_name")
    }

    /// `true` if this is a comment reply or username mention shown in the inbox.
    pub fn was_comment(&self) -> bool {
        self.fields.get("was_comment").and_then(Hydrated::as_bool).unwrap_or(false)
    }
}

impl Created for PrivateMessage {
    fn created(&self) -> Option<i64> {
        self.fields.get("created").and_then(Hydrated::as_timestamp)
    }

    fn created_utc(&self) -> Option<i64> {
        self.fields.get("created_utc").and_then(Hydrated::as_timestamp)
    }
}

impl Content for PrivateMessage {
    fn name(&self) -> Option<&str> {
        str_field(&self.fields, "name")
    }

    fn author(&self) -> Option<&RedditUser> {
        user_field(&self.fields, "author")
    }

    fn subreddit(&self) -> Option<&Subreddit> {
        subreddit_field(&self.fields, "subreddit")
    }
}

impl Editable for PrivateMessage {
    /// Reddit does not report edits of messages.
    fn edited(&self) -> bool {
        false
    }

    fn edited_time(&self) -> Option<i64> {
        None
    }

    fn body(&self) -> Option<&str> {
        str_field(&self.fields, "body")
    }
}

impl Commentable for PrivateMessage {
    fn replies(&self) -> Option<&Listing> {
        Some(&self.replies)
    }
}
