use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::Book;
use crate::db::seed::seed_books;

/// Book records keyed by id. A `BTreeMap` keeps every listing in id order.
#[derive(Clone)]
pub struct BookStore {
    books: Arc<RwLock<BTreeMap<u32, Book>>>,
}

impl BookStore {
    pub fn new(books: impl IntoIterator<Item = Book>) -> Self {
        let books = books.into_iter().map(|book| (book.id, book)).collect();
        Self {
            books: Arc::new(RwLock::new(books)),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_books())
    }

    pub async fn all(&self) -> BTreeMap<u32, Book> {
        self.books.read().await.clone()
    }

    pub async fn get(&self, id: u32) -> Option<Book> {
        self.books.read().await.get(&id).cloned()
    }

    /// Linear scan in id order.
    pub async fn find<P>(&self, predicate: P) -> Vec<Book>
    where
        P: Fn(&Book) -> bool,
    {
        self.books
            .read()
            .await
            .values()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }

    /// Runs `f` against the book under the write lock, so the whole
    /// read-modify-write is atomic. Returns `None` if the id is unknown.
    pub async fn update<F, T>(&self, id: u32, f: F) -> Option<T>
    where
        F: FnOnce(&mut Book) -> T,
    {
        let mut books = self.books.write().await;
        books.get_mut(&id).map(f)
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }
}
