use crate::structures::listing::Listing;
use crate::structures::value::{set_str_field, str_field, Fields, Hydrated};

/// A placeholder for children of a comment thread (or message thread) that Reddit did not send.
/// Its `children` are the ids to request from `/api/morechildren`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct More {
    /// The raw fields (`count`, `parent_id`, `children`, ...).
    pub fields: Fields,
    /// `true` if this came from an API record.
    pub has_fetched: bool,
    /// Replies attached by the reply-tree builder.
    pub replies: Option<Listing>,
}

impl More {
    /// Internal method. Placeholders are built by the `ObjectFactory`.
    pub fn new(data: Hydrated, has_fetched: bool) -> More {
        More {
            fields: data.into_fields(),
            has_fetched: has_fetched,
            replies: None,
        }
    }

    /// A placeholder with nothing left to fetch.
    pub fn empty() -> More {
        let mut fields = Fields::new();
        fields.insert(String::from("children"), Hydrated::Array(vec![]));
        More {
            fields: fields,
            has_fetched: false,
            replies: None,
        }
    }

    /// The fullname of the placeholder. Reddit uses `t1__` for "continue this thread" links.
    pub fn name(&self) -> Option<&str> {
        str_field(&self.fields, "name")
    }

    /// The fullname of the comment or submission these children belong under.
    pub fn parent_id(&self) -> Option<&str> {
        str_field(&self.fields, "parent_id")
    }

    /// The fullname of the submission, needed to fetch the children.
    pub fn link_id(&self) -> Option<&str> {
        str_field(&self.fields, "link_id")
    }

    /// `true` if a non-empty `link_id` is set.
    pub fn has_link_id(&self) -> bool {
        self.link_id().map_or(false, |l| !l.is_empty())
    }

    /// Sets (or with `None`, clears) the submission fullname.
    pub fn set_link_id(&mut self, link_id: Option<String>) {
        set_str_field(&mut self.fields, "link_id", link_id);
    }

    /// The ids of the children that have not been fetched.
    pub fn children(&self) -> Vec<&str> {
        match self.fields.get("children") {
            Some(&Hydrated::Array(ref ids)) => ids.iter().filter_map(Hydrated::as_str).collect(),
            _ => vec![],
        }
    }

    /// The number of unfetched descendants Reddit reports.
    pub fn count(&self) -> u64 {
        self.fields
            .get("count")
            .and_then(Hydrated::as_i64)
            .map_or(0, |c| c.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::More;

    #[test]
    fn empty_placeholder_has_no_children() {
        let more = More::empty();
        assert!(more.children().is_empty());
        assert_eq!(more.count(), 0);
        assert!(!more.has_link_id());
    }

    #[test]
    fn link_id_can_be_cleared() {
        let mut more = More::empty();
        more.set_link_id(Some(String::from("t3_a")));
        assert_eq!(more.link_id(), Some("t3_a"));
        more.set_link_id(None);
        assert_eq!(more.link_id(), None);
    }
}
