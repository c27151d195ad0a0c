//! Service layer implementing the property listing workflows on top of models.
//! - `property` keeps a property and its owner's `allProperties` list in sync.
//! - `media` abstracts the external image host.
//! - `user_service` covers the minimal user lookups the listing needs.

pub mod errors;
pub mod media;
pub mod pagination;
pub mod property;
pub mod user_service;
#[cfg(test)]
pub mod test_support;

pub use property::PropertyService;
