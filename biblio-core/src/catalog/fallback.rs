//! Built-in demo catalog used when the backend has nothing to offer

use crate::types::{BookId, BookRecord};

/// The fixed six-book dataset, IDs 1-6, in display order
pub fn fallback_books() -> Vec<BookRecord> {
    vec![
        BookRecord {
            id: Some(BookId::Number(1)),
            title: Some("The Great Gatsby".into()),
            author: Some("F. Scott Fitzgerald".into()),
            description: Some("A story of decadence and idealism in the Jazz Age".into()),
            cover_url: None,
            rating: Some(4.2),
            genre: Some("Classic".into()),
            published_year: Some(1925),
            pages: Some(180),
            isbn: Some("9780743273565".into()),
            views: Some(1240),
            available_copies: Some(3),
        },
        BookRecord {
            id: Some(BookId::Number(2)),
            title: Some("To Kill a Mockingbird".into()),
            author: Some("Harper Lee".into()),
            description: Some("A novel about racial injustice and moral growth".into()),
            cover_url: None,
            rating: Some(4.3),
            genre: Some("Fiction".into()),
            published_year: Some(1960),
            pages: Some(336),
            isbn: Some("9780446310789".into()),
            views: Some(980),
            available_copies: Some(2),
        },
        BookRecord {
            id: Some(BookId::Number(3)),
            title: Some("1984".into()),
            author: Some("George Orwell".into()),
            description: Some("A dystopian social science fiction novel".into()),
            cover_url: None,
            rating: Some(4.2),
            genre: Some("Dystopian".into()),
            published_year: Some(1949),
            pages: Some(328),
            isbn: Some("9780451524935".into()),
            views: Some(1530),
            available_copies: Some(4),
        },
        BookRecord {
            id: Some(BookId::Number(4)),
            title: Some("Pride and Prejudice".into()),
            author: Some("Jane Austen".into()),
            description: Some("A romantic novel of manners".into()),
            cover_url: None,
            rating: Some(4.3),
            genre: Some("Romance".into()),
            published_year: Some(1813),
            pages: Some(432),
            isbn: Some("9780141439518".into()),
            views: Some(870),
            available_copies: Some(5),
        },
        BookRecord {
            id: Some(BookId::Number(5)),
            title: Some("The Hobbit".into()),
            author: Some("J.R.R. Tolkien".into()),
            description: Some("A fantasy novel about Bilbo Baggins' adventure".into()),
            cover_url: None,
            rating: Some(4.3),
            genre: Some("Fantasy".into()),
            published_year: Some(1937),
            pages: Some(310),
            isbn: Some("9780547928227".into()),
            views: Some(1410),
            available_copies: Some(1),
        },
        BookRecord {
            id: Some(BookId::Number(6)),
            title: Some("Harry Potter and the Philosopher's Stone".into()),
            author: Some("J.K. Rowling".into()),
            description: Some("A young wizard discovers his magical heritage".into()),
            cover_url: None,
            rating: Some(4.5),
            genre: Some("Fantasy".into()),
            published_year: Some(1997),
            pages: Some(223),
            isbn: Some("9780747532699".into()),
            views: Some(2100),
            available_copies: Some(6),
        },
    ]
}
