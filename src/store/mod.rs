pub mod error;
pub mod knowledge;
pub mod learned_store;
pub mod storage;
