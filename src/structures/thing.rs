use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::structures::comment::Comment;
use crate::structures::content::RedditContent;
use crate::structures::listing::Listing;
use crate::structures::messages::PrivateMessage;
use crate::structures::more::More;
use crate::structures::submission::Submission;
use crate::structures::subreddit::Subreddit;
use crate::structures::user::RedditUser;
use crate::structures::value::{str_field, Fields, Hydrated};

/// The kind of entity a `Thing` holds, used to dispatch without matching on the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `RedditUser`
    User,
    /// `Subreddit`
    Subreddit,
    /// `Comment`
    Comment,
    /// `Submission`
    Submission,
    /// `PrivateMessage`
    Message,
    /// `More`
    More,
    /// `Listing`
    Listing,
    /// Any other entity, kept as `RedditContent`.
    Other,
}

/// Any entity that can appear in a hydrated response.
#[derive(Debug, Clone, PartialEq)]
pub enum Thing {
    /// A user, possibly a stub that only carries a name.
    User(RedditUser),
    /// A subreddit, possibly a stub that only carries a display name.
    Subreddit(Subreddit),
    /// A comment with its replies.
    Comment(Comment),
    /// A link post or self post.
    Submission(Submission),
    /// A private message.
    Message(PrivateMessage),
    /// A placeholder for children that have not been fetched.
    More(More),
    /// A listing of other entities.
    Listing(Listing),
    /// Everything else (trophies, wiki pages, mod actions, unknown kinds...).
    Content(RedditContent),
}

impl Thing {
    /// Which kind of entity this is.
    pub fn variant(&self) -> Variant {
        match *self {
            Thing::User(_) => Variant::User,
            Thing::Subreddit(_) => Variant::Subreddit,
            Thing::Comment(_) => Variant::Comment,
            Thing::Submission(_) => Variant::Submission,
            Thing::Message(_) => Variant::Message,
            Thing::More(_) => Variant::More,
            Thing::Listing(_) => Variant::Listing,
            Thing::Content(_) => Variant::Other,
        }
    }

    /// The source fields. Listings have none.
    pub fn fields(&self) -> Option<&Fields> {
        match *self {
            Thing::User(ref t) => Some(&t.fields),
            Thing::Subreddit(ref t) => Some(&t.fields),
            Thing::Comment(ref t) => Some(&t.fields),
            Thing::Submission(ref t) => Some(&t.fields),
            Thing::Message(ref t) => Some(&t.fields),
            Thing::More(ref t) => Some(&t.fields),
            Thing::Listing(_) => None,
            Thing::Content(ref t) => Some(&t.fields),
        }
    }

    fn fields_mut(&mut self) -> Option<&mut Fields> {
        match *self {
            Thing::User(ref mut t) => Some(&mut t.fields),
            Thing::Subreddit(ref mut t) => Some(&mut t.fields),
            Thing::Comment(ref mut t) => Some(&mut t.fields),
            Thing::Submission(ref mut t) => Some(&mut t.fields),
            Thing::Message(ref mut t) => Some(&mut t.fields),
            Thing::More(ref mut t) => Some(&mut t.fields),
            Thing::Listing(_) => None,
            Thing::Content(ref mut t) => Some(&mut t.fields),
        }
    }

    /// Looks up a source field.
    pub fn get(&self, key: &str) -> Option<&Hydrated> {
        self.fields().and_then(|fields| fields.get(key))
    }

    /// The fullname (kind + id, e.g. `t1_4te6jf`).
    pub fn name(&self) -> Option<&str> {
        self.fields().and_then(|fields| str_field(fields, "name"))
    }

    /// The fullname of the parent comment, submission or message.
    pub fn parent_id(&self) -> Option<&str> {
        self.fields().and_then(|fields| str_field(fields, "parent_id"))
    }

    /// The fullname of the submission this belongs to, if any.
    pub fn link_id(&self) -> Option<&str> {
        match *self {
            Thing::Listing(ref listing) => listing.link_id.as_ref().map(String::as_str),
            _ => self.fields().and_then(|fields| str_field(fields, "link_id")),
        }
    }

    /// `true` if this was built from a full API record rather than from a reference.
    pub fn has_fetched(&self) -> bool {
        match *self {
            Thing::User(ref t) => t.has_fetched,
            Thing::Subreddit(ref t) => t.has_fetched,
            Thing::Comment(ref t) => t.has_fetched,
            Thing::Submission(ref t) => t.has_fetched,
            Thing::Message(ref t) => t.has_fetched,
            Thing::More(ref t) => t.has_fetched,
            Thing::Listing(_) => true,
            Thing::Content(ref t) => t.has_fetched,
        }
    }

    /// The replies listing, if one has been attached.
    pub fn replies(&self) -> Option<&Listing> {
        match *self {
            Thing::User(ref t) => t.replies.as_ref(),
            Thing::Subreddit(ref t) => t.replies.as_ref(),
            Thing::Comment(ref t) => Some(&t.replies),
            Thing::Submission(ref t) => Some(&t.replies),
            Thing::Message(ref t) => Some(&t.replies),
            Thing::More(ref t) => t.replies.as_ref(),
            Thing::Listing(_) => None,
            Thing::Content(ref t) => t.replies.as_ref(),
        }
    }

    /// Mutable access to the replies listing, if one has been attached.
    pub fn replies_mut(&mut self) -> Option<&mut Listing> {
        match *self {
            Thing::User(ref mut t) => t.replies.as_mut(),
            Thing::Subreddit(ref mut t) => t.replies.as_mut(),
            Thing::Comment(ref mut t) => Some(&mut t.replies),
            Thing::Submission(ref mut t) => Some(&mut t.replies),
            Thing::Message(ref mut t) => Some(&mut t.replies),
            Thing::More(ref mut t) => t.replies.as_mut(),
            Thing::Listing(_) => None,
            Thing::Content(ref mut t) => t.replies.as_mut(),
        }
    }

    /// Replaces the replies listing. Listings have no replies slot, so this returns `false` and
    /// leaves them unchanged.
    pub fn set_replies(&mut self, replies: Listing) -> bool {
        match *self {
            Thing::User(ref mut t) => t.replies = Some(replies),
            Thing::Subreddit(ref mut t) => t.replies = Some(replies),
            Thing::Comment(ref mut t) => t.replies = replies,
            Thing::Submission(ref mut t) => t.replies = replies,
            Thing::Message(ref mut t) => t.replies = replies,
            Thing::More(ref mut t) => t.replies = Some(replies),
            Thing::Listing(_) => return false,
            Thing::Content(ref mut t) => t.replies = Some(replies),
        }
        true
    }

    /// Unwraps a listing.
    pub fn into_listing(self) -> Option<Listing> {
        match self {
            Thing::Listing(listing) => Some(listing),
            _ => None,
        }
    }

    /// Takes a field out of the entity, looking at the typed `replies`/`comments` slots first.
    pub fn into_field(mut self, key: &str) -> Option<Hydrated> {
        if key == "replies" && self.replies().is_some() {
            return self.into_replies().map(|l| Hydrated::thing(Thing::Listing(l)));
        }
        if key == "comments" {
            if let Thing::Submission(ref mut submission) = self {
                if let Some(comments) = submission.comments.take() {
                    return Some(Hydrated::thing(Thing::Listing(comments)));
                }
            }
        }
        self.fields_mut().and_then(|fields| fields.remove(key))
    }

    /// Takes the child at `index` out of a listing.
    pub fn into_child(self, index: usize) -> Option<Thing> {
        match self {
            Thing::Listing(listing) => listing.children.into_iter().nth(index),
            _ => None,
        }
    }

    fn into_replies(self) -> Option<Listing> {
        match self {
            Thing::User(t) => t.replies,
            Thing::Subreddit(t) => t.replies,
            Thing::Comment(t) => Some(t.replies),
            Thing::Submission(t) => Some(t.replies),
            Thing::Message(t) => Some(t.replies),
            Thing::More(t) => t.replies,
            Thing::Listing(_) => None,
            Thing::Content(t) => t.replies,
        }
    }
}

/// Serializes an entity as its field object, with the typed listing slots written under their
/// API names.
pub(crate) fn serialize_node<S>(fields: &Fields,
                                slots: &[(&str, Option<&Listing>)],
                                serializer: S)
                                -> Result<S::Ok, S::Error>
    where S: Serializer
{
    let mut map = serializer.serialize_map(None)?;
    for (key, value) in fields {
        let shadowed = slots.iter().any(|&(slot, listing)| slot == key.as_str() && listing.is_some());
        if !shadowed {
            map.serialize_entry(key, value)?;
        }
    }
    for &(key, slot) in slots {
        if let Some(listing) = slot {
            map.serialize_entry(key, listing)?;
        }
    }
    map.end()
}

impl Serialize for Thing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where S: Serializer
    {
        match *self {
            Thing::User(ref t) => t.serialize(serializer),
            Thing::Subreddit(ref t) => t.serialize(serializer),
            Thing::Comment(ref t) => {
                serialize_node(&t.fields, &[("replies", Some(&t.replies))], serializer)
            }
            Thing::Submission(ref t) => {
                serialize_node(&t.fields,
                               &[("replies", Some(&t.replies)), ("comments", t.comments.as_ref())],
                               serializer)
            }
            Thing::Message(ref t) => {
                serialize_node(&t.fields, &[("replies", Some(&t.replies))], serializer)
            }
            Thing::More(ref t) => {
                serialize_node(&t.fields, &[("replies", t.replies.as_ref())], serializer)
            }
            Thing::Listing(ref listing) => listing.serialize(serializer),
            Thing::Content(ref t) => {
                serialize_node(&t.fields, &[("replies", t.replies.as_ref())], serializer)
            }
        }
    }
}
