pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod models;
pub mod notify;
pub mod observability;
pub mod storage;
pub mod store;
