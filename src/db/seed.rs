use crate::db::models::Book;

/// The catalog every server instance starts with.
pub fn seed_books() -> Vec<Book> {
    vec![
        Book::new(1, "Things Fall Apart", "Chinua Achebe"),
        Book::new(2, "Fairy tales", "Hans Christian Andersen"),
        Book::new(3, "The Divine Comedy", "Dante Alighieri"),
        Book::new(4, "The Epic Of Gilgamesh", "Unknown"),
        Book::new(5, "The Book Of Job", "Unknown"),
        Book::new(6, "One Thousand and One Nights", "Unknown"),
        Book::new(7, "Njál's Saga", "Unknown"),
        Book::new(8, "Pride and Prejudice", "Jane Austen"),
        Book::new(9, "Le Père Goriot", "Honoré de Balzac"),
        Book::new(10, "Molloy, Malone Dies, The Unnamable, the trilogy", "Samuel Beckett"),
    ]
}
