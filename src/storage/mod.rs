pub mod backend;
pub mod file;
pub mod store;
