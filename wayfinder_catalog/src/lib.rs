#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Reference collaborators for the router: static and file-backed service
//! catalogs and two contact stores.

mod catalog;
mod file_catalog;
mod jsonl_store;
mod memory_store;

pub use catalog::StaticCatalog;
pub use file_catalog::FileCatalog;
pub use jsonl_store::JsonlContactStore;
pub use memory_store::InMemoryContactStore;

use wayfinder_core::{ContactQuery, ContactRecord, Page};

/// Newest first, optionally filtered by status.
pub(crate) fn select_page(mut records: Vec<ContactRecord>, query: &ContactQuery) -> Page<ContactRecord> {
    if let Some(status) = query.status {
        records.retain(|r| r.status == status);
    }
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
    Page::paginate(records, query.page, query.limit)
}
