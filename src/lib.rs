//! Auto-save form field drafts into a local key-value store.
//!
//! Each field is keyed by a path derived from its place in the document
//! (origin, route, enclosing form, sibling position), so a reloaded page
//! finds its saved values again. Values are captured on edit events,
//! restored when the field is bound, and erased on form submit or reset.
//!
//! ```no_run
//! use garlic::binder::binder::Binder;
//! use garlic::dom::document::Document;
//! use garlic::field::config::GarlicOptions;
//! use garlic::storage::{backend::MemoryBackend, store::Storage};
//!
//! let mut doc = Document::new("example.com", "/signup", "html");
//! let form = doc.append(doc.root(), "form", &[("id", "f")]).unwrap();
//! let email = doc.append(form, "input", &[("type", "text"), ("name", "email")]).unwrap();
//!
//! let mut binder = Binder::new(Storage::new(Box::new(MemoryBackend::new())));
//! binder.bind(&mut doc, form, &GarlicOptions::default());
//!
//! doc.set_value(email, "a@b.com").unwrap();
//! binder.dispatch(&mut doc, email, "input");
//! ```

pub mod binder;
pub mod cli;
pub mod dom;
pub mod error;
pub mod field;
pub mod path;
pub mod script;
pub mod storage;
pub mod trace;
