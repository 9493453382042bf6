use crate::replies::comment_replies_listing;
use crate::structures::listing::Listing;
use crate::structures::more::More;
use crate::structures::subreddit::Subreddit;
use crate::structures::user::RedditUser;
use crate::structures::value::{str_field, Fields, Hydrated};
use crate::traits::{edited_field, subreddit_field, user_field, Commentable, Content, Created,
                    Editable, ObjectFactory, Votable};

/// Reddit's name for the placeholder that stands for "continue this thread".
const CONTINUE_THREAD: &str = "t1__";

/// Structure representing a comment and its associated data (e.g. replies)
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    /// The raw fields, with `author` and `subreddit` replaced by stubs.
    pub fields: Fields,
    /// `true` if this came from an API record.
    pub has_fetched: bool,
    /// The replies loaded so far. This is always a comment list with a `more` placeholder, even
    /// when Reddit sent no replies.
    pub replies: Listing,
}

impl Comment {
    /// Internal method. Comments are built by the `ObjectFactory`.
    ///
    /// Reddit sends `replies: ""` for a comment without loaded replies, and an empty listing
    /// holding only a `t1__` placeholder when the thread is too deep to show. Both become an
    /// empty replies listing that can fetch this comment's replies later.
    pub fn new<F>(data: Hydrated, has_fetched: bool, factory: &F) -> Comment
        where F: ObjectFactory + ?Sized
    {
        let mut fields = data.into_fields();
        let sent = fields.remove("replies").and_then(Hydrated::into_listing);
        let mut comment = Comment {
            fields: fields,
            has_fetched: has_fetched,
            replies: Listing::default(),
        };
        comment.replies = match sent {
            Some(listing) if !continues_thread(&listing) => listing,
            _ => comment_replies_listing(&comment, factory),
        };
        let link_id = comment.link_id().map(str::to_owned);
        match comment.replies.more {
            Some(ref mut more) => {
                if !more.has_link_id() {
                    more.set_link_id(link_id);
                }
            }
            None => comment.replies.more = Some(Box::new(More::empty())),
        }
        comment
    }

    /// Gets the full ID of the parent submission/comment (kind + id e.g. 't1_4te6jf')
    pub fn parent_id(&self) -> Option<&str> {
        str_field(&self.fields, "parent_id")
    }

    /// Gets the full ID of the submission this comment was posted on.
    pub fn link_id(&self) -> Option<&str> {
        str_field(&self.fields, "link_id")
    }
}

fn continues_thread(listing: &Listing) -> bool {
    listing.is_empty() && listing.more().and_then(More::name) == Some(CONTINUE_THREAD)
}

impl Votable for Comment {
    fn score(&self) -> Option<i64> {
        self.fields.get("score").and_then(Hydrated::as_i64)
    }

    fn likes(&self) -> Option<bool> {
        self.fields.get("likes").and_then(Hydrated::as_bool)
    }
}

impl Created for Comment {
    fn created(&self) -> Option<i64> {
        self.fields.get("created").and_then(Hydrated::as_timestamp)
    }

    fn created_utc(&self) -> Option<i64> {
        self.fields.get("created_utc").and_then(Hydrated::as_timestamp)
    }
}

impl Editable for Comment {
    fn edited(&self) -> bool {
        edited_field(&self.fields).0
    }

    fn edited_time(&self) -> Option<i64> {
        edited_field(&self.fields).1
    }

    fn body(&self) -> Option<&str> {
        str_field(&self.fields, "body")
    }
}

impl Content for Comment {
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

impl Commentable for Comment {
    fn replies(&self) -> Option<&Listing> {
        Some(&self.replies)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::RedditClient;
    use crate::traits::{Content, Created, Editable, Votable};
    use crate::structures::thing::Thing;
    use super::Comment;

    fn comment(data: serde_json::Value) -> Comment {
        match RedditClient::new().populate(&json!({"kind": "t1", "data": data})).into_thing() {
            Some(Thing::Comment(comment)) => comment,
            other => panic!("expected a comment, got {:?}", other),
        }
    }

    #[test]
    fn empty_string_replies_become_listing() {
        let c = comment(json!({"name": "t1_c", "link_id": "t3_l", "replies": ""}));
        assert!(c.replies.is_empty());
        assert!(c.replies.is_comment_list);
        assert_eq!(c.replies.uri.as_ref().map(String::as_str), Some("comments/l"));
        assert_eq!(c.replies.query.get("comment").map(String::as_str), Some("c"));
        assert!(c.replies.more().expect("placeholder").children().is_empty());
    }

    #[test]
    fn continue_thread_placeholder_is_replaced() {
        let c = comment(json!({"name": "t1_c", "link_id": "t3_l", "replies": {
            "kind": "Listing", "data": {"children": [
                {"kind": "more", "data": {"name": "t1__", "parent_id": "t1_c", "children": []}}
            ]}
        }}));
        assert_eq!(c.replies.uri.as_ref().map(String::as_str), Some("comments/l"));
        assert_ne!(c.replies.more().and_then(|m| m.name()), Some("t1__"));
    }

    #[test]
    fn sent_placeholder_inherits_link_id() {
        let c = comment(json!({"name": "t1_c", "link_id": "t3_l", "replies": {
            "kind": "Listing", "data": {"children": [
                {"kind": "t1", "data": {"name": "t1_d", "link_id": "t3_l", "parent_id": "t1_c"}},
                {"kind": "more", "data": {"name": "t1_e", "parent_id": "t1_c", "children": ["e"]}}
            ]}
        }}));
        assert_eq!(c.replies.len(), 1);
        assert_eq!(c.replies.more().and_then(|m| m.link_id()), Some("t3_l"));
    }

    #[test]
    fn accessors() {
        let c = comment(json!({
            "name": "t1_c", "link_id": "t3_l", "author": "spez", "subreddit": "rust",
            "score": 12, "likes": null, "edited": 1470000000.0, "body": "hello",
            "created_utc": 1469900000
        }));
        assert_eq!(c.author().and_then(|u| u.name()), Some("spez"));
        assert!(!c.author().expect("author stub").has_fetched);
        assert_eq!(c.subreddit().and_then(|s| s.display_name()), Some("rust"));
        assert_eq!(c.score(), Some(12));
        assert_eq!(c.likes(), None);
        assert!(c.edited());
        assert_eq!(c.edited_time(), Some(1470000000));
        assert_eq!(c.body(), Some("hello"));
        assert_eq!(c.created_utc(), Some(1469900000));
    }
}
