pub use crate::client::RedditClient;
pub use crate::errors::APIError;
pub use crate::options::{HydrationOptions, ListingOptions};
pub use crate::structures::listing::Listing;
pub use crate::structures::thing::{Thing, Variant};
pub use crate::structures::value::Hydrated;
pub use crate::traits::*;
