pub mod field_model;
pub mod identity;
