pub mod document;
pub mod node;
pub mod selector;
pub mod snapshot;
pub mod source;
