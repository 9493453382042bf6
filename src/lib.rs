#![warn(missing_docs)]

//! # rawr-graph - typed object graphs for the Reddit API
//! This crate turns the JSON that the Reddit API sends into typed entities, and repairs the
//! flattened reply threads that some endpoints return. It does no network I/O: the host fetches
//! a response, parses it, and hands it over.
//! ## Quick Start
//! ### Creating a Client
//! The `RedditClient` is the factory that builds every entity. It needs no configuration:
//!
//! ```
//! use rawr_graph::client::RedditClient;
//! let client = RedditClient::new();
//! ```
//!
//! ### Hydrating a Response
//! Pass any response to `populate`. Every `{"kind": ..., "data": ...}` envelope becomes a typed
//! entity, and names of users and subreddits become stub entities:
//!
//! ```
//! # use rawr_graph::client::RedditClient;
//! use rawr_graph::prelude::*;
//! use serde_json::json;
//! # let client = RedditClient::new();
//! let listing = client.populate(&json!({"kind": "Listing", "data": {"children": [
//!     {"kind": "t3", "data": {"name": "t3_a", "title": "Hello", "author": "spez"}}
//! ]}})).into_listing().expect("a listing");
//! for post in &listing {
//!     if let Thing::Submission(ref post) = *post {
//!         assert_eq!(post.title(), Some("Hello"));
//!         assert_eq!(post.author().and_then(|a| a.name()), Some("spez"));
//!     }
//! }
//! ```
//!
//! Fetching one post with its comments returns a `[post listing, comment listing]` pair. That
//! pair hydrates to the submission alone, with the comments in `Submission.comments`.
//!
//! ### Threading Replies
//! Private message conversations and "load more comments" results are flat lists. Use
//! `build_replies_tree` to move every entity under its parent, and `find_message_in_tree` to
//! search the result:
//!
//! ```
//! # use rawr_graph::client::RedditClient;
//! use rawr_graph::replies::find_message_in_tree;
//! use serde_json::json;
//! # let client = RedditClient::new();
//! let inbox = client.populate(&json!({"kind": "Listing", "data": {"children": [
//!     {"kind": "t4", "data": {"name": "t4_1", "parent_id": null}},
//!     {"kind": "t4", "data": {"name": "t4_2", "parent_id": "t4_1"}}
//! ]}})).into_listing().expect("a listing");
//! let thread = client.build_replies_tree(inbox.children);
//! assert_eq!(thread.len(), 1);
//! assert!(find_message_in_tree("t4_2", &thread[0]).is_some());
//! ```
//!
//! ### Errors
//! Endpoints called with `api_type=json` report failures inside the response body. Run the
//! response through `util::handle_json_errors` to turn them into `APIError::RedditError`.
//!
//! # Logging
//! The crate logs through the `log` facade and installs no logger. Unknown kinds and skipped
//! listing children are logged at `debug`, and broken reply threads at `warn`.

/// The stock `ObjectFactory`.
pub mod client;
/// Error types used to signal problems with responses.
pub mod errors;
/// Configuration for hydration and listings.
pub mod options;
/// Permission strings for moderator and live thread invites.
pub mod permissions;
/// Converts raw responses into typed entities.
pub mod populate;
/// Basic `rawr_graph` structures to import with `use rawr_graph::prelude::*`;
pub mod prelude;
/// Reply threads.
pub mod replies;
/// Deserialized API responses.
pub mod responses;
/// Reddit structures such as submissions, comments and subreddits.
pub mod structures;
/// Traits for common API functionality.
pub mod traits;
/// Small helpers for handling raw responses.
pub mod util;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::prelude::*;

    #[test]
    fn submission_with_comment_section() {
        let client = RedditClient::new();
        let post = client.populate(&json!([
            {"kind": "Listing", "data": {"children": [
                {"kind": "t3", "data": {"name": "t3_p", "id": "p", "title": "Rust 2.0",
                                        "author": "ferris", "subreddit": "rust", "selftext": "",
                                        "num_comments": 3}}
            ]}},
            {"kind": "Listing", "data": {"children": [
                {"kind": "t1", "data": {"name": "t1_a", "parent_id": "t3_p", "link_id": "t3_p",
                                        "author": "alice", "body": "first", "replies": {
                    "kind": "Listing", "data": {"children": [
                        {"kind": "t1", "data": {"name": "t1_b", "parent_id": "t1_a",
                                                "link_id": "t3_p", "author": "bob",
                                                "body": "second", "replies": ""}}
                    ]}
                }}},
                {"kind": "more", "data": {"name": "t1_c", "parent_id": "t3_p", "count": 1,
                                          "children": ["c"]}}
            ]}}
        ]));
        let post = match post.into_thing() {
            Some(Thing::Submission(post)) => post,
            other => panic!("expected a submission, got {:?}", other),
        };
        assert_eq!(post.title(), Some("Rust 2.0"));
        assert_eq!(post.body(), None);
        assert_eq!(post.subreddit().and_then(|s| s.display_name()), Some("rust"));

        let comments = post.comments.as_ref().expect("comment section");
        assert_eq!(comments.more().and_then(|m| m.link_id()), Some("t3_p"));
        let first = match comments.get(0) {
            Some(&Thing::Comment(ref c)) => c,
            other => panic!("expected a comment, got {:?}", other),
        };
        assert_eq!(first.author().and_then(|a| a.name()), Some("alice"));
        let second = match first.replies.get(0) {
            Some(&Thing::Comment(ref c)) => c,
            other => panic!("expected a reply, got {:?}", other),
        };
        assert_eq!(second.body(), Some("second"));
        assert_eq!(second.replies.uri.as_ref().map(String::as_str), Some("comments/p"));
        assert!(second.replies.is_finished());
    }

    #[test]
    fn hydrated_graph_serializes_back() {
        let client = RedditClient::new();
        let raw = json!({"kind": "t4", "data": {"name": "t4_a", "author": "spez", "body": "hi"}});
        let message = client.populate(&raw);
        assert_eq!(message.to_json(),
                   json!({"name": "t4_a", "author": "spez", "body": "hi", "replies": []}));
    }
}
