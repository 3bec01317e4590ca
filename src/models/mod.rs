pub mod location;
pub mod property;
pub mod property_type;
