pub mod cli;
pub mod field;
pub mod page;
pub mod status;
pub mod store;
pub mod tracker;
