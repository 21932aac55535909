//! In-memory data stores for the bookstore server
//!
//! Books are seeded at startup and only their reviews change afterwards.
//! Users are added by registration. Nothing is persisted.

pub mod books;
pub mod models;
pub mod seed;
pub mod users;

pub use books::BookStore;
pub use models::{Book, Review, User};
pub use users::UserDirectory;
