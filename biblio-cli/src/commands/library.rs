//! Dashboard, lending, reviews and similar-book commands

use anyhow::{Context, Result};
use biblio_core::{ApiClient, AuthSession, BookId};

/// Show reading stats and current borrowings
pub async fn dashboard(client: &ApiClient, json: bool) -> Result<()> {
    if !AuthSession::new(client).is_logged_in().await {
        anyhow::bail!("Not logged in (run `biblio login` first)");
    }

    let dashboard = client.dashboard().await.context("Failed to load dashboard")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    let stats = &dashboard.stats;
    println!("Books read:     {}", stats.total_books_read);
    println!("Pages read:     {}", stats.total_pages_read);
    println!("Reading time:   {}", stats.reading_time_label());
    println!(
        "Streak:         {} days (best {})",
        stats.current_streak, stats.longest_streak
    );
    if let Some(genre) = stats.favorite_genre() {
        println!("Favorite genre: {}", genre);
    }

    let now = chrono::Utc::now();
    let active: Vec<_> = dashboard.active().collect();
    println!("\nBorrowed ({}):", active.len());
    if active.is_empty() {
        println!("  nothing on loan");
    }
    for borrowing in active {
        let due = borrowing
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let flag = if borrowing.is_overdue(now) { "  OVERDUE" } else { "" };
        println!("  [{}] {}  due {}{}", borrowing.id, borrowing.label(), due, flag);
    }

    let fines = dashboard.total_fines();
    if fines > 0.0 {
        println!("\nOutstanding fines: {:.2}", fines);
    }

    Ok(())
}

/// Borrow a book
pub async fn borrow(client: &ApiClient, book_id: &BookId) -> Result<()> {
    let borrowing = client
        .borrow(book_id)
        .await
        .with_context(|| format!("Failed to borrow book {}", book_id))?;

    match borrowing.due_date {
        Some(due) => println!("Borrowed {} (due {})", borrowing.label(), due.format("%Y-%m-%d")),
        None => println!("Borrowed {}", borrowing.label()),
    }
    Ok(())
}

/// Return a borrowed book
pub async fn return_book(client: &ApiClient, borrowing_id: &BookId) -> Result<()> {
    let receipt = client
        .return_book(borrowing_id)
        .await
        .with_context(|| format!("Failed to return borrowing {}", borrowing_id))?;

    if receipt.fine > 0.0 {
        println!("Returned (fine: {:.2})", receipt.fine);
    } else {
        println!("Returned");
    }
    Ok(())
}

/// Print the reviews of a book
pub async fn reviews(client: &ApiClient, book_id: &BookId, json: bool) -> Result<()> {
    let reviews = client
        .book_reviews(book_id)
        .await
        .with_context(|| format!("Failed to fetch reviews for book {}", book_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reviews)?);
        return Ok(());
    }

    if reviews.is_empty() {
        println!("No reviews yet");
        return Ok(());
    }

    for review in &reviews {
        let stars = "*".repeat(usize::from(review.rating.min(5)));
        println!("{:<5}  {}", stars, review.comment.as_deref().unwrap_or(""));
    }
    Ok(())
}

/// Print books similar to one book
pub async fn similar(client: &ApiClient, book_id: &BookId, limit: usize, json: bool) -> Result<()> {
    let similar = client
        .similar_books(book_id, limit)
        .await
        .with_context(|| format!("Failed to fetch books similar to {}", book_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&similar)?);
        return Ok(());
    }

    if similar.is_empty() {
        println!("No similar books found");
        return Ok(());
    }

    for rec in &similar {
        println!(
            "{:>4.0}%  {} by {}",
            rec.score * 100.0,
            rec.book.display_title(),
            rec.book.display_author()
        );
        if let Some(reason) = &rec.reason {
            println!("       {}", reason);
        }
    }
    Ok(())
}
