use crate::replies::submission_replies_listing;
use crate::structures::listing::Listing;
use crate::structures::subreddit::Subreddit;
use crate::structures::user::RedditUser;
use crate::structures::value::{str_field, Fields, Hydrated};
use crate::traits::{edited_field, subreddit_field, user_field, Commentable, Content, Created,
                    Editable, ObjectFactory, Votable};
use crate::util::strip_kind_prefix;

/// Structure representing a link post or self post (a submission) on Reddit.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// The raw fields, with `author` and `subreddit` replaced by stubs.
    pub fields: Fields,
    /// `true` if this came from an API record.
    pub has_fetched: bool,
    /// The comment section. Set when the submission was fetched together with its comments.
    pub comments: Option<Listing>,
    /// The replies loaded so far. Without any, this is an empty comment list that points at
    /// `comments/{id}`.
    pub replies: Listing,
}

impl Submission {
    /// Internal method. Submissions are built by the `ObjectFactory`. A `replies` listing sent
    /// by Reddit is kept; otherwise the submission gets an empty one for its comment section.
    pub fn new<F>(data: Hydrated, has_fetched: bool, factory: &F) -> Submission
        where F: ObjectFactory + ?Sized
    {
        let mut fields = data.into_fields();
        let sent = fields.remove("replies").and_then(Hydrated::into_listing);
        let mut submission = Submission {
            fields: fields,
            has_fetched: has_fetched,
            comments: None,
            replies: Listing::default(),
        };
        submission.replies = match sent {
            Some(listing) => listing,
            None => submission_replies_listing(&submission, factory),
        };
        submission
    }

    /// The ID of the post in base-36 form, as used in Reddit's links. Falls back to the
    /// fullname without its kind prefix.
    pub fn id(&self) -> Option<&str> {
        str_field(&self.fields, "id").or_else(|| self.name().map(strip_kind_prefix))
    }

    /// The title of the post.
    pub fn title(&self) -> Option<&str> {
        str_field(&self.fields, "title")
    }

    /// The number of comments Reddit reports for this post.
    pub fn num_comments(&self) -> Option<i64> {
        self.fields.get("num_comments").and_then(Hydrated::as_i64)
    }
}

impl Votable for Submission {
    fn score(&self) -> Option<i64> {
        self.fields.get("score").and_then(Hydrated::as_i64)
    }

    fn likes(&self) -> Option<bool> {
        self.fields.get("likes").and_then(Hydrated::as_bool)
    }
}

impl Created for Submission {
    fn created(&self) -> Option<i64> {
        self.fields.get("created").and_then(Hydrated::as_timestamp)
    }

    fn created_utc(&self) -> Option<i64> {
        self.fields.get("created_utc").and_then(Hydrated::as_timestamp)
    }
}

impl Editable for Submission {
    fn edited(&self) -> bool {
        edited_field(&self.fields).0
    }

    fn edited_time(&self) -> Option<i64> {
        edited_field(&self.fields).1
    }

    /// Link posts have an empty `selftext`, which is reported as no body.
    fn body(&self) -> Option<&str> {
        str_field(&self.fields, "selftext").filter(|text| !text.is_empty())
    }
}

impl Content for Submission {
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

impl Commentable for Submission {
    fn replies(&self) -> Option<&Listing> {
        Some(&self.replies)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::RedditClient;
    use crate::structures::thing::Thing;
    use crate::structures::value::Hydrated;
    use crate::traits::{Commentable, Content, Editable};
    use super::Submission;

    fn submission(data: serde_json::Value) -> Submission {
        Submission::new(Hydrated::from(&data), true, &RedditClient::new())
    }

    #[test]
    fn bare_submission_gets_comment_section_listing() {
        let post = RedditClient::new()
            .populate(&json!({"kind": "t3", "data": {"name": "t3_p", "id": "p"}}));
        let post = match post.into_thing() {
            Some(Thing::Submission(post)) => post,
            other => panic!("expected a submission, got {:?}", other),
        };
        assert!(post.comments.is_none());
        let replies = post.replies().expect("replies listing");
        assert!(replies.is_empty());
        assert!(replies.is_comment_list);
        assert_eq!(replies.uri.as_ref().map(String::as_str), Some("comments/p"));
        assert_eq!(replies.transform.to_string(), "comments");
    }

    #[test]
    fn replies_listing_falls_back_to_name() {
        let post = submission(json!({"name": "t3_abc"}));
        assert_eq!(post.replies.uri.as_ref().map(String::as_str), Some("comments/abc"));
    }

    #[test]
    fn id_falls_back_to_name() {
        assert_eq!(submission(serde_json::json!({"name": "t3_abc"})).id(), Some("abc"));
        assert_eq!(submission(serde_json::json!({"name": "t3_abc", "id": "xyz"})).id(),
                   Some("xyz"));
    }

    #[test]
    fn link_posts_have_no_body() {
        let post = submission(serde_json::json!({"name": "t3_a", "selftext": "", "edited": false}));
        assert_eq!(post.body(), None);
        assert!(!post.edited());
        assert_eq!(post.name(), Some("t3_a"));
    }
}
