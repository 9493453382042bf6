use std::collections::BTreeMap;
use std::slice::Iter;
use std::vec::IntoIter;

use log::debug;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::errors::APIError;
use crate::options::{ListingOptions, Transform};
use crate::structures::more::More;
use crate::structures::thing::Thing;
use crate::structures::value::{str_field, Hydrated};
use crate::traits::PageListing;

/// An ordered list of entities, with enough information to fetch the rest of it later.
///
/// Reddit sends listings as `{kind: "Listing", data: {children: [...], after, before}}`. A
/// comment listing may end with a `more` object, which is kept separately in `more` rather than
/// as a child. The order of `children` is the order Reddit ranked them in.
/// # Examples
/// ```
/// use rawr_graph::client::RedditClient;
/// use rawr_graph::traits::PageListing;
/// use serde_json::json;
/// let client = RedditClient::new();
/// let listing = client.populate(&json!({
///     "kind": "Listing",
///     "data": {"after": "t3_b", "before": null, "children": [
///         {"kind": "t3", "data": {"name": "t3_a"}},
///         {"kind": "t3", "data": {"name": "t3_b"}}
///     ]}
/// })).into_listing().expect("a listing");
/// assert_eq!(listing.len(), 2);
/// assert_eq!(listing.after(), Some("t3_b"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Listing {
    /// The entities in this listing, in order.
    pub children: Vec<Thing>,
    /// The endpoint more items come from.
    pub uri: Option<String>,
    /// Query parameters sent when fetching more items.
    pub query: BTreeMap<String, String>,
    /// Picks this listing out of a fetched response.
    pub transform: Transform,
    /// The fullname of the submission that a comment list belongs to.
    pub link_id: Option<String>,
    /// `true` if this is a threaded comment list.
    pub is_comment_list: bool,
    /// Placeholder for children that have not been fetched yet.
    pub more: Option<Box<More>>,
    /// Pagination anchor for the previous page.
    pub before: Option<String>,
    /// Pagination anchor for the next page.
    pub after: Option<String>,
}

impl Listing {
    /// Internal method. Use `ObjectFactory::new_listing` so that hosts can substitute their own
    /// construction.
    pub fn new(options: ListingOptions) -> Listing {
        Listing {
            uri: options.uri,
            query: options.query,
            transform: options.transform,
            link_id: options.link_id,
            is_comment_list: options.is_comment_list,
            ..Listing::default()
        }
    }

    /// Builds a listing from the `data` of a `Listing` envelope. Children that did not hydrate to
    /// an entity are skipped, and a trailing `More` becomes the placeholder.
    pub fn from_data(data: Hydrated) -> Listing {
        let mut fields = data.into_fields();
        let mut listing = Listing {
            before: str_field(&fields, "before").map(str::to_owned),
            after: str_field(&fields, "after").map(str::to_owned),
            ..Listing::default()
        };
        if let Some(Hydrated::Array(children)) = fields.remove("children") {
            for child in children {
                match child {
                    Hydrated::Thing(thing) => listing.children.push(*thing),
                    other => debug!("skipping listing child that is not an entity: {:?}", other),
                }
            }
        }
        if let Some(&Thing::More(_)) = listing.children.last() {
            if let Some(Thing::More(more)) = listing.children.pop() {
                listing.set_more(more);
            }
        }
        listing
    }

    /// Installs the placeholder for unfetched children. Only comment lists have one, so this also
    /// marks the listing as a comment list.
    pub fn set_more(&mut self, more: More) {
        self.more = Some(Box::new(more));
        self.is_comment_list = true;
    }

    /// The placeholder for unfetched children, if any.
    pub fn more(&self) -> Option<&More> {
        self.more.as_ref().map(|m| &**m)
    }

    /// `true` if there is nothing left to fetch.
    pub fn is_finished(&self) -> bool {
        if self.is_comment_list {
            self.more().map_or(true, |more| more.children().is_empty())
        } else {
            self.uri.is_none() || self.after.is_none()
        }
    }

    /// Appends an entity.
    pub fn push(&mut self, item: Thing) {
        self.children.push(item);
    }

    /// The number of entities currently loaded.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// `true` if no entities are loaded.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The entity at `index`.
    pub fn get(&self, index: usize) -> Option<&Thing> {
        self.children.get(index)
    }

    /// Iterates over the loaded entities.
    pub fn iter(&self) -> Iter<'_, Thing> {
        self.children.iter()
    }

    /// Picks the listing that this listing's transform points at out of a hydrated response,
    /// e.g. the replies of one comment from a `comments/{id}?comment={id}` response.
    pub fn extract(&self, response: Hydrated) -> Result<Listing, APIError> {
        self.transform
            .apply(response)?
            .into_listing()
            .ok_or_else(|| APIError::MissingField(self.transform.to_string()))
    }
}

impl PageListing for Listing {
    fn before(&self) -> Option<&str> {
        self.before.as_ref().map(String::as_str)
    }

    fn after(&self) -> Option<&str> {
        self.after.as_ref().map(String::as_str)
    }
}

impl IntoIterator for Listing {
    type Item = Thing;
    type IntoIter = IntoIter<Thing>;

    fn into_iter(self) -> IntoIter<Thing> {
        self.children.into_iter()
    }
}

impl<'a> IntoIterator for &'a Listing {
    type Item = &'a Thing;
    type IntoIter = Iter<'a, Thing>;

    fn into_iter(self) -> Iter<'a, Thing> {
        self.children.iter()
    }
}

impl Serialize for Listing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
        for child in &self.children {
            seq.serialize_element(child)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::RedditClient;
    use crate::errors::APIError;
    use crate::structures::thing::Variant;
    use crate::structures::value::Hydrated;
    use super::Listing;

    fn listing(data: serde_json::Value) -> Listing {
        RedditClient::new()
            .populate(&json!({"kind": "Listing", "data": data}))
            .into_listing()
            .expect("a listing")
    }

    #[test]
    fn trailing_more_becomes_placeholder() {
        let listing = listing(json!({"children": [
            {"kind": "t1", "data": {"name": "t1_a", "link_id": "t3_x", "parent_id": "t3_x"}},
            {"kind": "more", "data": {"name": "t1_b", "parent_id": "t3_x", "count": 4,
                                      "children": ["b", "c"]}}
        ]}));
        assert_eq!(listing.len(), 1);
        assert!(listing.is_comment_list);
        let more = listing.more().expect("placeholder");
        assert_eq!(more.children(), vec!["b", "c"]);
        assert!(!listing.is_finished());
    }

    #[test]
    fn skips_children_that_are_not_entities() {
        let listing = listing(json!({"children": [3, {"kind": "t3", "data": {"name": "t3_a"}}]}));
        assert_eq!(listing.len(), 1);
        assert_eq!(listing.get(0).map(|t| t.variant()), Some(Variant::Submission));
    }

    #[test]
    fn plain_listing_without_uri_is_finished() {
        let listing = listing(json!({"children": [], "after": "t3_z"}));
        assert!(listing.is_finished());
        assert!(listing.more().is_none());
    }

    #[test]
    fn serializes_as_array() {
        let listing = listing(json!({"children": [{"kind": "t3", "data": {"name": "t3_a"}}]}));
        assert_eq!(serde_json::to_value(&listing).unwrap(),
                   json!([{"name": "t3_a", "replies": []}]));
    }

    #[test]
    fn extract_picks_comment_replies_from_comment_page() {
        let client = RedditClient::new();
        let comment = client.populate(&json!({"kind": "t1", "data": {
            "name": "t1_c", "link_id": "t3_p", "parent_id": "t3_p", "replies": ""
        }}));
        let pending = comment.into_thing()
            .and_then(|c| c.replies().cloned())
            .expect("empty replies listing");
        assert!(pending.is_empty());

        let page = client.populate(&json!([
            {"kind": "Listing", "data": {"children": [
                {"kind": "t3", "data": {"name": "t3_p", "id": "p"}}
            ]}},
            {"kind": "Listing", "data": {"children": [
                {"kind": "t1", "data": {"name": "t1_c", "link_id": "t3_p", "parent_id": "t3_p",
                                        "replies": {"kind": "Listing", "data": {"children": [
                    {"kind": "t1", "data": {"name": "t1_d", "link_id": "t3_p",
                                            "parent_id": "t1_c", "replies": ""}}
                ]}}}}
            ]}}
        ]));
        let replies = pending.extract(page).expect("replies of t1_c");
        let names: Vec<_> = replies.iter().filter_map(|t| t.name()).collect();
        assert_eq!(names, vec!["t1_d"]);
    }

    #[test]
    fn extract_reports_missing_path() {
        let listing = Listing::new(crate::options::ListingOptions::new()
            .transform(crate::options::Transform::path("comments")));
        match listing.extract(Hydrated::Null) {
            Err(APIError::MissingField(path)) => assert_eq!(path, "comments"),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
