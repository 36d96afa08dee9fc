//! Recommendation, search and health commands

use anyhow::{bail, Context, Result};
use biblio_core::ApiClient;

/// Print recommendations for a user
pub async fn recommend(client: &ApiClient, user_id: &str, json: bool) -> Result<()> {
    let recommendations = client
        .recommend(user_id)
        .await
        .with_context(|| format!("Failed to fetch recommendations for user {}", user_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    if recommendations.is_empty() {
        println!("No recommendations yet");
        return Ok(());
    }

    for rec in &recommendations {
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

/// Print semantic search results
pub async fn search(client: &ApiClient, query: &str, json: bool) -> Result<()> {
    let hits = client
        .ai_search(query)
        .await
        .with_context(|| format!("Search failed for '{}'", query))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No results for '{}'", query);
        return Ok(());
    }

    for hit in &hits {
        match hit.similarity_score {
            Some(score) => println!(
                "{:.2}  {} by {}",
                score,
                hit.book.display_title(),
                hit.book.display_author()
            ),
            None => println!(
                "      {} by {}",
                hit.book.display_title(),
                hit.book.display_author()
            ),
        }
    }

    Ok(())
}

/// Print backend health; fails when the backend reports a problem
pub async fn health(client: &ApiClient, json: bool) -> Result<()> {
    let status = client
        .health()
        .await
        .with_context(|| format!("Backend at {} is unreachable", client.config().base_url))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Status:   {}", status.status);
        if let Some(database) = status.database {
            println!("Database: {}", if database { "up" } else { "down" });
        }
        for (model, ready) in &status.ai_models {
            println!("Model {}: {}", model, if *ready { "ready" } else { "not ready" });
        }
    }

    if !status.is_healthy() {
        bail!("Backend reported status '{}'", status.status);
    }
    Ok(())
}
