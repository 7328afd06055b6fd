pub mod property_service;

pub use property_service::{PropertyError, PropertyService};
