//! The stock object factory. A `RedditClient` turns responses that the host has already fetched
//! into typed entities, and knows how to build every entity type the hydrator asks for.
//! # Examples
//! ## Creating a RedditClient
//! The default client uses Reddit's kind table and reference fields. A host that needs to
//! recognise extra fields can pass its own `HydrationOptions`.
//!
//! ```
//! use rawr_graph::client::RedditClient;
//! use rawr_graph::options::HydrationOptions;
//! let client = RedditClient::new();
//! let options = HydrationOptions::from_json(r#"{"user_keys": ["author", "owner"]}"#)
//!     .expect("valid options");
//! let custom = RedditClient::with_options(options);
//! assert!(custom.options().is_user_key("owner"));
//! assert!(!client.options().is_user_key("owner"));
//! ```
//!
//! ## Loading more comments
//! `/api/morechildren` returns a flat list; `more_children` hydrates and threads it.
//!
//! ```
//! use rawr_graph::client::RedditClient;
//! use serde_json::json;
//! let client = RedditClient::new();
//! let comments = client.more_children(&json!({"json": {"errors": [], "data": {"things": [
//!     {"kind": "t1", "data": {"name": "t1_a", "parent_id": "t3_p", "link_id": "t3_p"}},
//!     {"kind": "t1", "data": {"name": "t1_b", "parent_id": "t1_a", "link_id": "t3_p"}}
//! ]}}})).expect("no API errors");
//! assert_eq!(comments.len(), 1);
//! ```

use log::debug;
use serde::Deserialize;
use serde_json::{from_str, Value};

use crate::errors::APIError;
use crate::options::HydrationOptions;
use crate::populate::populate_with;
use crate::replies::build_replies_tree;
use crate::responses::MoreChildren;
use crate::structures::comment::Comment;
use crate::structures::content::RedditContent;
use crate::structures::listing::Listing;
use crate::structures::messages::PrivateMessage;
use crate::structures::more::More;
use crate::structures::submission::Submission;
use crate::structures::subreddit::Subreddit;
use crate::structures::thing::Thing;
use crate::structures::user::RedditUser;
use crate::structures::value::Hydrated;
use crate::traits::ObjectFactory;
use crate::util::{handle_json_errors, is_empty_response};

/// Builds typed entities from Reddit responses. See the module-level documentation for examples.
#[derive(Debug, Clone, Default)]
pub struct RedditClient {
    options: HydrationOptions,
}

impl RedditClient {
    /// Creates a client with the default kind table and reference fields.
    pub fn new() -> RedditClient {
        RedditClient::default()
    }

    /// Creates a client that hydrates with custom options.
    pub fn with_options(options: HydrationOptions) -> RedditClient {
        RedditClient { options: options }
    }

    /// The options this client hydrates with.
    pub fn options(&self) -> &HydrationOptions {
        &self.options
    }

    /// Hydrates a parsed response.
    pub fn populate(&self, response: &Value) -> Hydrated {
        populate_with(response, &self.options, self)
    }

    /// Parses and hydrates a response body.
    pub fn populate_str(&self, body: &str) -> Result<Hydrated, APIError> {
        let response: Value = from_str(body)?;
        Ok(self.populate(&response))
    }

    /// Threads a flat list of comments or messages. See `replies::build_replies_tree`.
    pub fn build_replies_tree(&self, list: Vec<Thing>) -> Vec<Thing> {
        build_replies_tree(list, self)
    }

    /// Turns a `/api/morechildren` response into threaded comments. API-reported errors become
    /// `APIError::RedditError`, and an empty response gives no comments.
    pub fn more_children(&self, response: &Value) -> Result<Vec<Thing>, APIError> {
        if is_empty_response(response) {
            return Ok(vec![]);
        }
        handle_json_errors(())(response)?;
        let things = MoreChildren::deserialize(response)?
            .json
            .data
            .map_or_else(Vec::new, |list| list.things);
        let mut list = Vec::with_capacity(things.len());
        for thing in &things {
            match self.populate(thing).into_thing() {
                Some(thing) => list.push(thing),
                None => debug!("morechildren returned an entry that is not an entity: {}", thing),
            }
        }
        Ok(self.build_replies_tree(list))
    }
}

impl ObjectFactory for RedditClient {
    fn new_object(&self, kind_name: &str, data: Hydrated, has_fetched: bool) -> Thing {
        match kind_name {
            "Comment" => Thing::Comment(Comment::new(data, has_fetched, self)),
            "Submission" => Thing::Submission(Submission::new(data, has_fetched, self)),
            "PrivateMessage" => Thing::Message(PrivateMessage::new(data, has_fetched, self)),
            "RedditUser" => Thing::User(RedditUser::new(data, has_fetched)),
            "Subreddit" => Thing::Subreddit(Subreddit::new(data, has_fetched)),
            "More" => Thing::More(More::new(data, has_fetched)),
            "Listing" => Thing::Listing(Listing::from_data(data)),
            other => Thing::Content(RedditContent::new(other, data, has_fetched)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::errors::APIError;
    use crate::structures::thing::{Thing, Variant};
    use crate::structures::value::Hydrated;
    use crate::traits::ObjectFactory;
    use super::RedditClient;

    #[test]
    fn unknown_names_build_generic_content() {
        let client = RedditClient::new();
        match client.new_object("ModAction", Hydrated::Null, true) {
            Thing::Content(content) => {
                assert_eq!(content.type_name, "ModAction");
                assert!(content.has_fetched);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn populate_str_reports_bad_json() {
        match RedditClient::new().populate_str("{not json") {
            Err(APIError::JSONError(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        let value = RedditClient::new().populate_str("[1, \"a\"]").expect("valid json");
        assert_eq!(value.to_json(), json!([1, "a"]));
    }

    #[test]
    fn more_children_threads_results() {
        let client = RedditClient::new();
        let comments = client.more_children(&json!({"json": {"errors": [], "data": {"things": [
            {"kind": "t1", "data": {"name": "t1_a", "parent_id": "t3_p", "link_id": "t3_p"}},
            {"kind": "t1", "data": {"name": "t1_b", "parent_id": "t1_a", "link_id": "t3_p"}},
            {"kind": "more", "data": {"name": "t1_m", "parent_id": "t1_b", "children": ["z"]}},
            {"kind": "t1", "data": {"name": "t1_c", "parent_id": "t3_p", "link_id": "t3_p"}}
        ]}}})).expect("no API errors");
        let top: Vec<_> = comments.iter().filter_map(Thing::name).collect();
        assert_eq!(top, vec!["t1_a", "t1_c"]);
        let b = comments[0].replies().and_then(|r| r.get(0)).expect("t1_b under t1_a");
        let more = b.replies().and_then(|r| r.more()).expect("placeholder");
        assert_eq!(more.children(), vec!["z"]);
        assert_eq!(more.link_id(), Some("t3_p"));
    }

    #[test]
    fn more_children_surfaces_api_errors() {
        let client = RedditClient::new();
        let response = json!({"json": {"errors": [["RATELIMIT", "slow down", "ratelimit"]]}});
        match client.more_children(&response) {
            Err(APIError::RedditError(message)) => {
                assert_eq!(message, "RATELIMIT,slow down,ratelimit")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn more_children_of_empty_response_is_empty() {
        let client = RedditClient::new();
        for response in vec![json!(null), json!(""), json!({}), json!([])] {
            let comments = client.more_children(&response).expect("empty response passes");
            assert!(comments.is_empty());
        }
    }

    #[test]
    fn more_children_without_data_is_empty() {
        let client = RedditClient::new();
        let comments = client.more_children(&json!({"json": {"errors": []}})).expect("no errors");
        assert!(comments.is_empty());
        assert_eq!(client.new_object("Listing", Hydrated::Null, true).variant(), Variant::Listing);
    }
}
