use crate::options::ListingOptions;
use crate::structures::listing::Listing;
use crate::structures::subreddit::Subreddit;
use crate::structures::thing::Thing;
use crate::structures::user::RedditUser;
use crate::structures::value::{thing_field, Fields, Hydrated};

/// Builds typed entities by type name. The hydrator and the reply-tree builder never construct
/// entities themselves; they ask a factory, so a host can decorate or replace construction.
///
/// `RedditClient` is the stock implementation.
pub trait ObjectFactory {
    /// Builds the entity named `kind_name` (e.g. `Comment`, `RedditUser`) from an already
    /// hydrated payload. Unknown names must produce a generic `RedditContent` rather than fail.
    /// `has_fetched` is `false` for stubs that were created from a bare name.
    fn new_object(&self, kind_name: &str, data: Hydrated, has_fetched: bool) -> Thing;

    /// Builds a listing with the given lazy-fetch configuration.
    fn new_listing(&self, options: ListingOptions) -> Listing {
        Listing::new(options)
    }
}

impl<'a, F: ObjectFactory + ?Sized> ObjectFactory for &'a F {
    fn new_object(&self, kind_name: &str, data: Hydrated, has_fetched: bool) -> Thing {
        (**self).new_object(kind_name, data, has_fetched)
    }

    fn new_listing(&self, options: ListingOptions) -> Listing {
        (**self).new_listing(options)
    }
}

/// An object that can be voted upon and has a score based on the upvotes - downvotes.
/// ## Notes
/// The `ups` and `downs` values from the API no longer represent the true upvotes and downvotes,
/// so this trait does not expose them.
pub trait Votable {
    /// The (fuzzed) points score of the object.
    fn score(&self) -> Option<i64>;
    /// Indicates the logged-in user's current vote on this object:
    /// - Some(true) = Upvoted
    /// - Some(false) = Downvoted
    /// - None = No vote
    fn likes(&self) -> Option<bool>;
}

/// A paginatable listing.
pub trait PageListing {
    /// The ID to use for anchoring when paginating to the previous page.
    fn before(&self) -> Option<&str>;
    /// The ID to use for anchoring when paginating to the next page.
    fn after(&self) -> Option<&str>;
}

/// An object that was created at some point (e.g. a subreddit, a submission or a comment)
pub trait Created {
    /// The timestamp of the time when the post was created, as would be shown to the logged-in
    /// user.
    fn created(&self) -> Option<i64>;
    /// The timestamp of post creation, in UTC.
    fn created_utc(&self) -> Option<i64>;
}

/// An object that can be edited (anything that has a body).
pub trait Editable {
    /// `true` if edited, otherwise `false`.
    fn edited(&self) -> bool;
    /// The timestamp of the last edit, if edited.
    fn edited_time(&self) -> Option<i64>;
    /// The markdown body, if present.
    fn body(&self) -> Option<&str>;
}

/// An object that was created by an author and is in a subreddit (i.e. a submission or comment)
pub trait Content {
    /// Gets the full ID of this object (kind + id)
    fn name(&self) -> Option<&str>;
    /// The author of the object. This is a stub that only knows the author's name.
    fn author(&self) -> Option<&RedditUser>;
    /// For submissions (link/self posts), this is the subreddit where it was posted. For comments,
    /// this is the subreddit of the parent submission.
    fn subreddit(&self) -> Option<&Subreddit>;
}

/// An object that may have replies.
pub trait Commentable {
    /// The replies that have been loaded so far. Submissions only have replies once the
    /// reply-tree builder has attached them; use `Submission::comments` for the comment section.
    fn replies(&self) -> Option<&Listing>;
}

/// Reads the stub user stored under `key`.
pub(crate) fn user_field<'a>(fields: &'a Fields,
                             key: &str)
                             -> Option<&'a RedditUser> {
    match thing_field(fields, key) {
        Some(&Thing::User(ref user)) => Some(user),
        _ => None,
    }
}

/// Reads the stub subreddit stored under `key`.
pub(crate) fn subreddit_field<'a>(fields: &'a Fields,
                                  key: &str)
                                  -> Option<&'a Subreddit> {
    match thing_field(fields, key) {
        Some(&Thing::Subreddit(ref subreddit)) => Some(subreddit),
        _ => None,
    }
}

/// Reads `edited`, which is `false` when unedited and the edit timestamp otherwise.
pub(crate) fn edited_field(fields: &Fields) -> (bool, Option<i64>) {
    match fields.get("edited") {
        Some(&Hydrated::Bool(edited)) => (edited, None),
        Some(other) => {
            let time = other.as_timestamp();
            (time.is_some(), time)
        }
        None => (false, None),
    }
}
