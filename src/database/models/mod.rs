pub mod property;

pub use property::{PropertiesResponse, Pagination, Property, PropertyInput};
