//! Property workflows.
//!
//! Creation and deletion touch two tables (the property row and the owner's
//! `all_properties` list) and always run inside a [`PropertyUnitOfWork`].

pub mod domain;
pub mod query;
pub mod service;
pub mod unit_of_work;

pub use domain::{CreateProperty, PropertyDetail, PropertyPatch};
pub use query::{ListPage, ListProperties, SortOrder};
pub use service::PropertyService;
pub use unit_of_work::PropertyUnitOfWork;
