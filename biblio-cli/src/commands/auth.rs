//! Login, registration and profile commands

use anyhow::{Context, Result};
use biblio_core::types::RegisterRequest;
use biblio_core::{ApiClient, AuthSession};

/// Log in and persist the token
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<()> {
    AuthSession::new(client)
        .login(email, password)
        .await
        .with_context(|| format!("Login failed for {}", email))?;

    println!("Logged in as {}", email);
    Ok(())
}

/// Create an account and persist the token
pub async fn register(
    client: &ApiClient,
    email: &str,
    password: &str,
    name: Option<String>,
    phone: Option<String>,
) -> Result<()> {
    let mut request = RegisterRequest::new(email, password);
    request.name = name;
    request.phone = phone;

    AuthSession::new(client)
        .register(&request)
        .await
        .with_context(|| format!("Registration failed for {}", email))?;

    println!("Registered and logged in as {}", email);
    Ok(())
}

/// Forget the stored token
pub async fn logout(client: &ApiClient) -> Result<()> {
    AuthSession::new(client).logout().await?;
    println!("Logged out");
    Ok(())
}

/// Show the current user's profile
pub async fn whoami(client: &ApiClient, json: bool) -> Result<()> {
    if !AuthSession::new(client).is_logged_in().await {
        anyhow::bail!("Not logged in (run `biblio login` first)");
    }

    let profile = client.me().await.context("Failed to fetch profile")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!("Email: {}", profile.email);
        if let Some(name) = &profile.name {
            println!("Name:  {}", name);
        }
        if let Some(phone) = &profile.phone {
            println!("Phone: {}", phone);
        }
        println!("ID:    {}", profile.id);
    }

    Ok(())
}
