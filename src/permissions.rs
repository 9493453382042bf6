//! Permission strings for moderator invites and live thread contributors.
//!
//! Reddit expects permissions as a comma-separated list that marks every known permission as
//! granted (`+`) or withheld (`-`), or the wildcard `+all`.

use crate::options::{LIVETHREAD_PERMISSIONS, MODERATOR_PERMISSIONS};

/// Formats `requested` against the full list `all_permission_names`. `None` grants everything;
/// otherwise each known permission appears once, in the order of `all_permission_names`.
///
/// ```
/// use rawr_graph::permissions::format_permissions;
/// assert_eq!(format_permissions(&["a", "b", "c"], Some(&["b"][..])), "-a,+b,-c");
/// assert_eq!(format_permissions::<&str>(&["a", "b"], None), "+all");
/// ```
pub fn format_permissions<S>(all_permission_names: &[&str], requested: Option<&[S]>) -> String
    where S: AsRef<str>
{
    match requested {
        None => String::from("+all"),
        Some(requested) => {
            all_permission_names.iter()
                .map(|name| {
                    let granted = requested.iter().any(|r| r.as_ref() == *name);
                    format!("{}{}", if granted { '+' } else { '-' }, name)
                })
                .collect::<Vec<_>>()
                .join(",")
        }
    }
}

/// Formats moderator permissions (`wiki`, `posts`, `access`, `mail`, `config`, `flair`).
pub fn format_mod_permissions<S: AsRef<str>>(requested: Option<&[S]>) -> String {
    format_permissions(MODERATOR_PERMISSIONS, requested)
}

/// Formats live thread permissions (`update`, `edit`, `manage`).
pub fn format_livethread_permissions<S: AsRef<str>>(requested: Option<&[S]>) -> String {
    format_permissions(LIVETHREAD_PERMISSIONS, requested)
}
