pub mod catalog;
pub mod listing;
pub mod property;

pub use listing::{ListingPage, ListingQuery, Purpose};
pub use property::PropertyRecord;
