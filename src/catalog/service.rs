use std::collections::BTreeMap;

use crate::db::{Book, BookStore, Review};
use crate::error::{AppError, CatalogError};

/// ISBNs here are small integers keyed by their canonical decimal form, so
/// `08`, `+8` and ` 8` name no book.
pub fn parse_isbn(raw: &str) -> Result<u32, AppError> {
    raw.parse::<u32>()
        .ok()
        .filter(|id| id.to_string() == raw)
        .ok_or_else(|| CatalogError::BookNotFound(raw.to_string()).into())
}

#[derive(Clone)]
pub struct CatalogService {
    books: BookStore,
}

impl CatalogService {
    pub fn new(books: BookStore) -> Self {
        Self { books }
    }

    pub async fn get_all(&self) -> BTreeMap<u32, Book> {
        self.books.all().await
    }

    pub async fn len(&self) -> usize {
        self.books.len().await
    }

    pub async fn get_by_isbn(&self, isbn: u32) -> Result<Book, AppError> {
        self.books
            .get(isbn)
            .await
            .ok_or_else(|| CatalogError::BookNotFound(isbn.to_string()).into())
    }

    pub async fn get_by_author(&self, author: &str) -> Result<Vec<Book>, AppError> {
        let needle = author.to_lowercase();
        let found = self
            .books
            .find(|book| book.author.to_lowercase().contains(&needle))
            .await;

        if found.is_empty() {
            return Err(CatalogError::NoBooksByAuthor(author.to_string()).into());
        }
        Ok(found)
    }

    pub async fn get_by_title(&self, title: &str) -> Result<Vec<Book>, AppError> {
        let needle = title.to_lowercase();
        let found = self
            .books
            .find(|book| book.title.to_lowercase().contains(&needle))
            .await;

        if found.is_empty() {
            return Err(CatalogError::NoBooksWithTitle(title.to_string()).into());
        }
        Ok(found)
    }

    pub async fn get_reviews(&self, isbn: u32) -> Result<BTreeMap<String, Review>, AppError> {
        self.get_by_isbn(isbn).await.map(|book| book.reviews)
    }

    /// Adds or replaces `username`'s review. Concurrent writers for the same
    /// user and book resolve last-write-wins.
    pub async fn upsert_review(
        &self,
        isbn: u32,
        username: &str,
        text: &str,
    ) -> Result<Review, AppError> {
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "Review text is required to add or modify a review".into(),
            ));
        }

        let review = Review::new(text.to_string());
        self.books
            .update(isbn, |book| {
                book.reviews.insert(username.to_string(), review.clone());
            })
            .await
            .ok_or_else(|| AppError::from(CatalogError::BookNotFound(isbn.to_string())))?;

        Ok(review)
    }

    pub async fn delete_review(&self, isbn: u32, username: &str) -> Result<Review, AppError> {
        self.books
            .update(isbn, |book| book.reviews.remove(username))
            .await
            .ok_or_else(|| AppError::from(CatalogError::BookNotFound(isbn.to_string())))?
            .ok_or_else(|| {
                CatalogError::ReviewNotFound {
                    isbn,
                    username: username.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> CatalogService {
        CatalogService::new(BookStore::seeded())
    }

    #[tokio::test]
    async fn test_get_by_isbn() {
        let catalog = catalog();
        let book = catalog.get_by_isbn(8).await.unwrap();
        assert_eq!(book.title, "Pride and Prejudice");
        assert_eq!(book.author, "Jane Austen");

        let missing = catalog.get_by_isbn(999).await;
        assert!(matches!(missing, Err(AppError::CatalogError(CatalogError::BookNotFound(_)))));
    }

    #[tokio::test]
    async fn test_author_search_is_case_insensitive() {
        let catalog = catalog();
        let lower = catalog.get_by_author("austen").await.unwrap();
        let upper = catalog.get_by_author("Austen").await.unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.len(), 1);
        assert_eq!(lower[0].id, 8);
    }

    #[tokio::test]
    async fn test_author_search_keeps_id_order() {
        let catalog = catalog();
        let unknown = catalog.get_by_author("unknown").await.unwrap();
        let ids: Vec<u32> = unknown.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![4, 5, 6, 7]);

        let none = catalog.get_by_author("tolkien").await;
        assert!(matches!(none, Err(AppError::CatalogError(CatalogError::NoBooksByAuthor(_)))));
    }

    #[tokio::test]
    async fn test_title_search() {
        let catalog = catalog();
        let found = catalog.get_by_title("THE BOOK").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 5);

        let none = catalog.get_by_title("Hobbit").await;
        assert!(matches!(none, Err(AppError::CatalogError(CatalogError::NoBooksWithTitle(_)))));
    }

    #[tokio::test]
    async fn test_reviews_empty_until_written() {
        let catalog = catalog();
        assert!(catalog.get_reviews(1).await.unwrap().is_empty());
        assert!(catalog.get_reviews(999).await.is_err());
    }

    #[tokio::test]
    async fn test_upsert_overwrites_previous_review() {
        let catalog = catalog();
        catalog.upsert_review(8, "alice", "Good").await.unwrap();
        let second = catalog.upsert_review(8, "alice", "Even better").await.unwrap();

        let reviews = catalog.get_reviews(8).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews["alice"], second);
        assert_eq!(reviews["alice"].text, "Even better");
    }

    #[tokio::test]
    async fn test_upsert_validation() {
        let catalog = catalog();
        let empty = catalog.upsert_review(8, "alice", "").await;
        assert!(matches!(empty, Err(AppError::ValidationError(_))));

        let missing = catalog.upsert_review(999, "alice", "Good").await;
        assert!(matches!(missing, Err(AppError::CatalogError(CatalogError::BookNotFound(_)))));
    }

    #[tokio::test]
    async fn test_delete_review() {
        let catalog = catalog();
        catalog.upsert_review(8, "alice", "Good").await.unwrap();
        catalog.upsert_review(8, "bob", "Fine").await.unwrap();

        let removed = catalog.delete_review(8, "alice").await.unwrap();
        assert_eq!(removed.text, "Good");

        let reviews = catalog.get_reviews(8).await.unwrap();
        assert!(!reviews.contains_key("alice"));
        assert!(reviews.contains_key("bob"));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_review() {
        let catalog = catalog();
        let result = catalog.delete_review(8, "alice").await;
        assert!(matches!(
            result,
            Err(AppError::CatalogError(CatalogError::ReviewNotFound { isbn: 8, .. }))
        ));

        let result = catalog.delete_review(999, "alice").await;
        assert!(matches!(result, Err(AppError::CatalogError(CatalogError::BookNotFound(_)))));
    }

    #[test]
    fn test_parse_isbn() {
        assert_eq!(parse_isbn("8").unwrap(), 8);
        assert!(matches!(
            parse_isbn("abc"),
            Err(AppError::CatalogError(CatalogError::BookNotFound(_)))
        ));
        assert!(parse_isbn("-1").is_err());
        assert!(parse_isbn("08").is_err());
        assert!(parse_isbn("+8").is_err());
        assert!(parse_isbn(" 8").is_err());
        assert!(parse_isbn("").is_err());
        assert_eq!(parse_isbn("10").unwrap(), 10);
    }

    #[tokio::test]
    async fn test_whitespace_review_is_stored() {
        let catalog = catalog();
        let review = catalog.upsert_review(8, "alice", "   ").await.unwrap();
        assert_eq!(review.text, "   ");
        assert_eq!(catalog.get_reviews(8).await.unwrap()["alice"].text, "   ");
    }

    #[tokio::test]
    async fn test_len_counts_seeded_books() {
        assert_eq!(catalog().len().await, 10);
    }
}
