//! Catalog command implementation

use anyhow::{Context, Result};
use biblio_core::catalog::{CatalogLoader, CatalogPage, CatalogSourceKind};
use biblio_core::{ApiClient, BookRecord};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Catalog output
#[derive(Serialize)]
struct CatalogView {
    source: CatalogSourceKind,
    notice: Option<String>,
    search: Option<String>,
    total: usize,
    books: Vec<BookRecord>,
}

/// Load the catalog once and print it, optionally filtered
pub async fn books(client: ApiClient, search: Option<&str>, json: bool) -> Result<()> {
    let loader = CatalogLoader::new(client.config().timeout);
    let mut page = CatalogPage::new(Arc::new(client), loader);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Loading catalog...");

    page.mount().await;

    // Ctrl-C tears the page down like navigating away would
    let outcome = tokio::select! {
        outcome = page.wait_loaded() => outcome,
        _ = tokio::signal::ctrl_c() => {
            page.unmount().await;
            None
        }
    };
    pb.finish_and_clear();
    let outcome = outcome.context("Catalog load was interrupted")?;

    if let Some(term) = search {
        page.set_search(term);
    }
    let visible = page.visible().await;

    if json {
        let view = CatalogView {
            source: outcome.result.source,
            notice: outcome.notice.clone(),
            search: search.map(String::from),
            total: outcome.result.books.len(),
            books: visible,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if let Some(notice) = &outcome.notice {
        println!("{}\n", notice);
    }

    if visible.is_empty() {
        match search {
            Some(term) => println!("No books match '{}'", term),
            None => println!("No books available"),
        }
        return Ok(());
    }

    for book in &visible {
        print_book(book);
    }

    println!(
        "\nShowing {} of {} books (source: {})",
        visible.len(),
        outcome.result.books.len(),
        outcome.result.source
    );

    Ok(())
}

fn print_book(book: &BookRecord) {
    println!(
        "[{}] {:<42} {:<22} {:<10} {:.1}/5  {} available",
        book.cover_glyph(),
        truncate(book.display_title(), 42),
        truncate(book.display_author(), 22),
        book.genre.as_deref().unwrap_or("-"),
        book.display_rating(),
        book.display_available()
    );
}

/// Shorten to at most `max` characters, marking the cut with '…'
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dune", 10), "Dune");
        assert_eq!(truncate("Harry Potter", 6), "Harry…");
        assert_eq!(truncate("", 3), "");
    }
}
