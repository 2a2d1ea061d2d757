pub mod logger;
pub mod status_model;
