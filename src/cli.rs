pub mod args;
pub mod config;
pub mod errors;
pub mod page;
