//! Rebuilds reply threads from the flat lists Reddit sends.
//!
//! Private message conversations and `/api/morechildren` results arrive as one flat list in which
//! every entity names its parent through `parent_id`. `build_replies_tree` turns that list back
//! into a tree by moving each entity into its parent's `replies` listing.

use std::collections::HashMap;

use log::{trace, warn};

use crate::options::{ListingOptions, Transform};
use crate::structures::comment::Comment;
use crate::structures::listing::Listing;
use crate::structures::more::More;
use crate::structures::submission::Submission;
use crate::structures::thing::Thing;
use crate::traits::{Content, ObjectFactory};
use crate::util::strip_kind_prefix;

/// Threads a flat list of entities.
///
/// Every entity first gets a fresh, empty replies listing (comments also get an empty `more`
/// placeholder). An entity whose `parent_id` names another entity in the list is then moved
/// under that parent: a `More` becomes the parent's placeholder and inherits its `link_id`,
/// anything else is appended to the parent's replies. Entities whose parent is not in the list
/// stay at the top level, in their original order.
///
/// If several entities share a name, the last one is treated as the parent.
pub fn build_replies_tree<F>(list: Vec<Thing>, factory: &F) -> Vec<Thing>
    where F: ObjectFactory + ?Sized
{
    let mut index = HashMap::with_capacity(list.len());
    for (pos, item) in list.iter().enumerate() {
        if let Some(name) = item.name() {
            index.insert(name.to_owned(), pos);
        }
    }

    let mut roots = vec![];
    let mut children = vec![vec![]; list.len()];
    for (pos, item) in list.iter().enumerate() {
        match item.parent_id().and_then(|parent| index.get(parent)) {
            Some(&parent) => children[parent].push(pos),
            None => roots.push(pos),
        }
    }
    trace!("reply tree: {} entities, {} at the top level", list.len(), roots.len());

    let nodes = list.into_iter()
        .map(|mut item| {
            add_empty_replies_listing(&mut item, factory);
            if let Thing::Comment(ref mut comment) = item {
                comment.replies.more = Some(Box::new(More::empty()));
            }
            Some(item)
        })
        .collect();
    let mut tree = TreeBuilder {
        nodes: nodes,
        children: children,
        top: vec![],
    };

    for pos in roots {
        tree.attach_to_top(pos);
    }
    let mut stranded = 0;
    for pos in 0..tree.nodes.len() {
        if tree.nodes[pos].is_some() {
            stranded += 1;
            tree.attach_to_top(pos);
        }
    }
    if stranded > 0 {
        warn!("{} entities have no ancestor outside a parent_id cycle, keeping them at the top level",
              stranded);
    }
    tree.top
}

struct TreeBuilder {
    nodes: Vec<Option<Thing>>,
    children: Vec<Vec<usize>>,
    top: Vec<Thing>,
}

impl TreeBuilder {
    fn attach_to_top(&mut self, pos: usize) {
        if let Some(item) = self.assemble(pos) {
            self.top.push(item);
        }
    }

    /// Takes the entity at `pos` out of the list with all of its descendants relinked under it.
    /// Returns `None` if it was already taken, which only happens inside a cycle.
    fn assemble(&mut self, pos: usize) -> Option<Thing> {
        let mut parent = self.nodes[pos].take()?;
        let children = std::mem::take(&mut self.children[pos]);
        for child in children {
            if let Some(child) = self.assemble(child) {
                if let Some(orphan) = relink(&mut parent, child) {
                    self.top.push(orphan);
                }
            }
        }
        Some(parent)
    }
}

/// Moves `child` under `parent`, handing it back if `parent` cannot hold replies.
fn relink(parent: &mut Thing, child: Thing) -> Option<Thing> {
    let link_id = parent.link_id().map(str::to_owned);
    let replies = match parent.replies_mut() {
        Some(replies) => replies,
        None => return Some(child),
    };
    match child {
        Thing::More(mut more) => {
            more.set_link_id(link_id);
            replies.set_more(more);
        }
        other => replies.push(other),
    }
    None
}

/// Builds the listing that stands for "no replies loaded yet" on `item`.
///
/// For a comment this points at `comments/{link id}?comment={comment id}` and picks the
/// comment's replies out of the response; for a submission it points at `comments/{id}`. Other
/// entities get a plain empty listing.
pub fn empty_replies_listing<F>(item: &Thing, factory: &F) -> Listing
    where F: ObjectFactory + ?Sized
{
    match *item {
        Thing::Comment(ref comment) => comment_replies_listing(comment, factory),
        Thing::Submission(ref submission) => submission_replies_listing(submission, factory),
        _ => factory.new_listing(ListingOptions::new()),
    }
}

/// Replaces the replies of `item` with `empty_replies_listing(item)`. Listings have no replies
/// and are returned unchanged.
pub fn add_empty_replies_listing<'a, F>(item: &'a mut Thing, factory: &F) -> &'a mut Thing
    where F: ObjectFactory + ?Sized
{
    let replies = empty_replies_listing(item, factory);
    item.set_replies(replies);
    item
}

/// The empty replies listing of a comment.
pub fn comment_replies_listing<F>(comment: &Comment, factory: &F) -> Listing
    where F: ObjectFactory + ?Sized
{
    let link_id = comment.link_id().unwrap_or("");
    let id = comment.name().map_or("", strip_kind_prefix);
    factory.new_listing(ListingOptions::new()
        .uri(format!("comments/{}", strip_kind_prefix(link_id)))
        .query("comment", id)
        .transform(Transform::path("comments[0].replies"))
        .link_id(comment.link_id().map(str::to_owned))
        .comment_list())
}

/// The empty comment section of a submission.
pub fn submission_replies_listing<F>(submission: &Submission, factory: &F) -> Listing
    where F: ObjectFactory + ?Sized
{
    factory.new_listing(ListingOptions::new()
        .uri(format!("comments/{}", submission.id().unwrap_or("")))
        .transform(Transform::path("comments"))
        .comment_list())
}

/// Finds the entity named `target` in the thread below (and including) `root`, searching depth
/// first and left to right. The first match wins.
pub fn find_message_in_tree<'a>(target: &str, root: &'a Thing) -> Option<&'a Thing> {
    if root.name() == Some(target) {
        return Some(root);
    }
    root.replies()
        .into_iter()
        .flat_map(Listing::iter)
        .filter_map(|reply| find_message_in_tree(target, reply))
        .next()
}
