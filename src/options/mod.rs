use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter, Result as FmtResult};

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::errors::APIError;
use crate::structures::value::Hydrated;

/// Type name used when a kind tag is not in the kind table.
pub const DEFAULT_KIND: &str = "RedditContent";

/// Maps the `kind` of an API envelope to the type name passed to the `ObjectFactory`.
pub const KINDS: &[(&str, &str)] = &[
    ("t1", "Comment"),
    ("t2", "RedditUser"),
    ("t3", "Submission"),
    ("t4", "PrivateMessage"),
    ("t5", "Subreddit"),
    ("t6", "Trophy"),
    ("t8", "PromoCampaign"),
    ("Listing", "Listing"),
    ("more", "More"),
    ("UserList", "UserList"),
    ("KarmaList", "KarmaList"),
    ("TrophyList", "TrophyList"),
    ("subreddit_settings", "SubredditSettings"),
    ("modaction", "ModAction"),
    ("wikipage", "WikiPage"),
    ("wikipagelisting", "WikiPageListing"),
    ("wikipagesettings", "WikiPageSettings"),
    ("LiveUpdate", "LiveUpdate"),
    ("LiveUpdateEvent", "LiveUpdateEvent"),
    ("LabeledMulti", "MultiReddit"),
];

/// Fields whose value is the name of a user.
pub const USER_KEYS: &[&str] = &["author", "approved_by", "banned_by", "mod"];

/// Fields whose value is the display name of a subreddit.
pub const SUBREDDIT_KEYS: &[&str] = &["subreddit", "sr_name"];

/// Moderator permissions, in the order the API expects them.
pub const MODERATOR_PERMISSIONS: &[&str] = &["wiki", "posts", "access", "mail", "config", "flair"];

/// Live thread contributor permissions, in the order the API expects them.
pub const LIVETHREAD_PERMISSIONS: &[&str] = &["update", "edit", "manage"];

static SHARED_OPTIONS: Lazy<HydrationOptions> = Lazy::new(HydrationOptions::default);

/// Configures how raw responses are turned into typed objects.
///
/// The defaults match the Reddit API. A host can override any part with a JSON document; missing
/// sections keep their defaults:
///
/// ```
/// use rawr_graph::options::HydrationOptions;
/// let opts = HydrationOptions::from_json(r#"{"subreddit_keys": ["subreddit"]}"#).unwrap();
/// assert!(!opts.is_subreddit_key("sr_name"));
/// assert_eq!(opts.kind_name("t1"), Some("Comment"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HydrationOptions {
    /// Kind tag to type name.
    pub kinds: BTreeMap<String, String>,
    /// Field names that are replaced with a stub `RedditUser`.
    pub user_keys: BTreeSet<String>,
    /// Field names that are replaced with a stub `Subreddit`.
    pub subreddit_keys: BTreeSet<String>,
}

impl Default for HydrationOptions {
    fn default() -> HydrationOptions {
        HydrationOptions {
            kinds: KINDS.iter().map(|&(k, v)| (k.to_owned(), v.to_owned())).collect(),
            user_keys: USER_KEYS.iter().map(|&k| k.to_owned()).collect(),
            subreddit_keys: SUBREDDIT_KEYS.iter().map(|&k| k.to_owned()).collect(),
        }
    }
}

impl HydrationOptions {
    /// The default options, created once and shared.
    pub fn shared() -> &'static HydrationOptions {
        &SHARED_OPTIONS
    }

    /// Parses an override document. Sections that are not present keep their defaults.
    pub fn from_json(text: &str) -> Result<HydrationOptions, APIError> {
        Ok(serde_json::from_str(text)?)
    }

    /// The type name for a kind tag, or `None` if the tag is unknown.
    pub fn kind_name(&self, kind: &str) -> Option<&str> {
        self.kinds.get(kind).map(String::as_str)
    }

    /// `true` if values under `key` name a user.
    pub fn is_user_key(&self, key: &str) -> bool {
        self.user_keys.contains(key)
    }

    /// `true` if values under `key` name a subreddit.
    pub fn is_subreddit_key(&self, key: &str) -> bool {
        self.subreddit_keys.contains(key)
    }
}

/// One step of a `Transform` path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// An object key or entity field, e.g. `replies`.
    Key(String),
    /// A position in an array or listing, e.g. `[0]`.
    Index(usize),
}

/// A property path that picks the interesting part out of a response, such as
/// `comments[0].replies` for the replies below a single comment. The empty path returns the
/// response unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transform {
    path: Vec<PathSegment>,
}

impl Transform {
    /// Parses a dotted path with optional `[n]` indices. A bracketed part that is not a number is
    /// treated as a key.
    pub fn path(path: &str) -> Transform {
        let mut segments = vec![];
        for part in path.split('.').filter(|p| !p.is_empty()) {
            let mut pieces = part.split('[');
            if let Some(key) = pieces.next() {
                if !key.is_empty() {
                    segments.push(PathSegment::Key(key.to_owned()));
                }
            }
            for piece in pieces {
                let piece = piece.trim_end_matches(']');
                match piece.parse::<usize>() {
                    Ok(index) => segments.push(PathSegment::Index(index)),
                    Err(_) => segments.push(PathSegment::Key(piece.to_owned())),
                }
            }
        }
        Transform { path: segments }
    }

    /// `true` for the empty path.
    pub fn is_identity(&self) -> bool {
        self.path.is_empty()
    }

    /// The parsed path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.path
    }

    /// Walks the path through `response`, consuming it.
    pub fn apply(&self, response: Hydrated) -> Result<Hydrated, APIError> {
        let mut current = response;
        for segment in &self.path {
            let next = match *segment {
                PathSegment::Key(ref key) => match current {
                    Hydrated::Object(mut fields) => fields.remove(key),
                    Hydrated::Thing(thing) => (*thing).into_field(key),
                    _ => None,
                },
                PathSegment::Index(index) => match current {
                    Hydrated::Array(mut items) if index < items.len() => Some(items.swap_remove(index)),
                    Hydrated::Thing(thing) => (*thing).into_child(index).map(Hydrated::thing),
                    _ => None,
                },
            };
            current = next.ok_or_else(|| APIError::MissingField(self.to_string()))?;
        }
        Ok(current)
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for (i, segment) in self.path.iter().enumerate() {
            match *segment {
                PathSegment::Key(ref key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(ref key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Configures a lazily-fetched listing: where more items come from and how to find them in the
/// response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingOptions {
    /// The endpoint the listing is fetched from, e.g. `comments/4te6jf`.
    pub uri: Option<String>,
    /// Query parameters sent with every fetch.
    pub query: BTreeMap<String, String>,
    /// Picks the listing out of the fetched response.
    pub transform: Transform,
    /// The fullname of the submission that a comment list belongs to.
    pub link_id: Option<String>,
    /// `true` if this is a threaded comment list rather than a flat listing.
    pub is_comment_list: bool,
}

impl ListingOptions {
    /// Options for a plain listing with nothing to fetch.
    pub fn new() -> ListingOptions {
        ListingOptions::default()
    }

    /// Sets the endpoint.
    pub fn uri(mut self, uri: String) -> ListingOptions {
        self.uri = Some(uri);
        self
    }

    /// Adds a query parameter.
    pub fn query(mut self, key: &str, value: &str) -> ListingOptions {
        self.query.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Sets the response transform.
    pub fn transform(mut self, transform: Transform) -> ListingOptions {
        self.transform = transform;
        self
    }

    /// Sets the owning submission.
    pub fn link_id(mut self, link_id: Option<String>) -> ListingOptions {
        self.link_id = link_id;
        self
    }

    /// Marks the listing as a comment list.
    pub fn comment_list(mut self) -> ListingOptions {
        self.is_comment_list = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{HydrationOptions, PathSegment, Transform};

    #[test]
    fn defaults_match_reddit() {
        let opts = HydrationOptions::default();
        assert_eq!(opts.kind_name("t3"), Some("Submission"));
        assert_eq!(opts.kind_name("LabeledMulti"), Some("MultiReddit"));
        assert_eq!(opts.kind_name("t9"), None);
        assert!(opts.is_user_key("approved_by"));
        assert!(opts.is_subreddit_key("sr_name"));
        assert!(!opts.is_user_key("subreddit"));
    }

    #[test]
    fn override_document_keeps_other_sections() {
        let opts = HydrationOptions::from_json(r#"{"user_keys": ["author", "owner"]}"#)
            .expect("valid document");
        assert!(opts.is_user_key("owner"));
        assert!(!opts.is_user_key("mod"));
        assert_eq!(opts.kinds, HydrationOptions::default().kinds);
    }

    #[test]
    fn malformed_document_is_a_json_error() {
        assert!(HydrationOptions::from_json("{\"kinds\": 3}").is_err());
    }

    #[test]
    fn transform_paths() {
        let t = Transform::path("comments[0].replies");
        assert_eq!(t.segments(),
                   &[PathSegment::Key("comments".to_owned()),
                     PathSegment::Index(0),
                     PathSegment::Key("replies".to_owned())]);
        assert_eq!(t.to_string(), "comments[0].replies");
        assert!(Transform::path("").is_identity());
    }
}
