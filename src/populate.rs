//! Turns raw API responses into typed object graphs.
//!
//! Reddit wraps every entity in an envelope of the form `{"kind": "t1", "data": {...}}`, and
//! refers to users and subreddits by bare name (`"author": "spez"`). `populate` walks a response,
//! asks an `ObjectFactory` for an entity wherever it finds an envelope, and swaps those name
//! references for stub entities. Everything else is copied as is.
//!
//! ```
//! use rawr_graph::client::RedditClient;
//! use rawr_graph::structures::thing::Variant;
//! use serde_json::json;
//! let client = RedditClient::new();
//! let post = client.populate(&json!({"kind": "t3", "data": {"name": "t3_a", "author": "spez"}}));
//! let post = post.as_thing().expect("an entity");
//! assert_eq!(post.variant(), Variant::Submission);
//! assert_eq!(post.get("author").and_then(|a| a.as_thing()).map(|a| a.variant()),
//!            Some(Variant::User));
//! ```

use log::debug;
use serde_json::{Map, Value};

use crate::options::{HydrationOptions, DEFAULT_KIND};
use crate::structures::thing::Thing;
use crate::structures::value::Hydrated;
use crate::traits::ObjectFactory;

/// Hydrates `response` with the default options.
pub fn populate<F>(response: &Value, factory: &F) -> Hydrated
    where F: ObjectFactory + ?Sized
{
    populate_with(response, HydrationOptions::shared(), factory)
}

/// Hydrates `response` using the kind table and reference keys in `options`.
pub fn populate_with<F>(response: &Value, options: &HydrationOptions, factory: &F) -> Hydrated
    where F: ObjectFactory + ?Sized
{
    match *response {
        Value::Object(ref map) if is_tagged_envelope(map) => {
            let data = map.get("data")
                .map_or(Hydrated::Null, |data| populate_with(data, options, factory));
            let kind_name = envelope_kind_name(map, options);
            Hydrated::thing(factory.new_object(kind_name, data, true))
        }
        Value::Object(ref map) => {
            Hydrated::Object(map.iter()
                .map(|(key, value)| (key.to_owned(), populate_entry(key, value, options, factory)))
                .collect())
        }
        Value::Array(ref items) => {
            let items = items.iter().map(|item| populate_with(item, options, factory)).collect();
            merge_submission_with_comments(items)
        }
        ref primitive => Hydrated::from(primitive),
    }
}

/// `true` for `{kind, data}` envelopes: exactly two keys, one of which is a truthy `kind`.
pub fn is_tagged_envelope(map: &Map<String, Value>) -> bool {
    map.len() == 2 && map.get("kind").map_or(false, is_truthy)
}

/// `true` for the `[submission listing, comment listing]` pair that Reddit returns when a single
/// submission is fetched together with its comments.
pub fn is_submission_with_comments(items: &[Hydrated]) -> bool {
    match items {
        [Hydrated::Thing(first), Hydrated::Thing(second)] => {
            match (&**first, &**second) {
                (&Thing::Listing(ref posts), &Thing::Listing(_)) => starts_with_submission(&posts.children),
                _ => false,
            }
        }
        _ => false,
    }
}

fn starts_with_submission(children: &[Thing]) -> bool {
    matches!(children.first(), Some(&Thing::Submission(_)))
}

fn envelope_kind_name<'o>(map: &Map<String, Value>, options: &'o HydrationOptions) -> &'o str {
    let kind = map.get("kind");
    match kind.and_then(Value::as_str).and_then(|k| options.kind_name(k)) {
        Some(name) => name,
        None => {
            debug!("unknown kind {:?}, building {}", kind, DEFAULT_KIND);
            DEFAULT_KIND
        }
    }
}

fn populate_entry<F>(key: &str, value: &Value, options: &HydrationOptions, factory: &F) -> Hydrated
    where F: ObjectFactory + ?Sized
{
    if !value.is_null() && options.is_user_key(key) {
        let data = Hydrated::object_with("name", Hydrated::from(value));
        return Hydrated::thing(factory.new_object("RedditUser", data, false));
    }
    if !value.is_null() && options.is_subreddit_key(key) {
        let data = Hydrated::object_with("display_name", Hydrated::from(value));
        return Hydrated::thing(factory.new_object("Subreddit", data, false));
    }
    populate_with(value, options, factory)
}

/// Collapses the `[submission listing, comment listing]` pair into the submission, with the
/// comment listing attached as its `comments`.
fn merge_submission_with_comments(items: Vec<Hydrated>) -> Hydrated {
    if !is_submission_with_comments(&items) {
        return Hydrated::Array(items);
    }
    let mut items = items.into_iter().filter_map(Hydrated::into_thing);
    match (items.next(), items.next()) {
        (Some(Thing::Listing(mut posts)), Some(Thing::Listing(mut comments))) => {
            match posts.children.remove(0) {
                Thing::Submission(mut submission) => {
                    if let Some(ref mut more) = comments.more {
                        if !more.has_link_id() {
                            more.set_link_id(submission.fields
                                .get("name")
                                .and_then(Hydrated::as_str)
                                .map(str::to_owned));
                        }
                    }
                    submission.comments = Some(comments);
                    Hydrated::thing(Thing::Submission(submission))
                }
                other => {
                    posts.children.insert(0, other);
                    Hydrated::Array(vec![Hydrated::thing(Thing::Listing(posts)),
                                         Hydrated::thing(Thing::Listing(comments))])
                }
            }
        }
        (first, second) => {
            Hydrated::Array(first.into_iter().chain(second).map(Hydrated::thing).collect())
        }
    }
}

/// JavaScript truthiness, which decides whether `kind` marks an envelope.
fn is_truthy(value: &Value) -> bool {
    match *value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(ref n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(ref s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
