//! Catalog queries and review management over the book store

pub mod handlers;
mod service;

pub use service::{parse_isbn, CatalogService};
