//! Library listing domain module

mod listing;

pub use listing::{ListingDocument, ProjectListing, LISTING_TITLE};
