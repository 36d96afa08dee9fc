//! Biblio CLI - Command-line front end for the Biblio library

mod commands;

use anyhow::Result;
use biblio_core::BookId;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate timeout argument (must be at least 1)
fn parse_timeout(s: &str) -> Result<u64, String> {
    let n: u64 = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("timeout must be at least 1 second".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "biblio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL (overrides BIBLIO_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides BIBLIO_TIMEOUT_SECS)
    #[arg(long, global = true, value_parser = parse_timeout)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the book catalog
    Books {
        /// Only show books whose title, author or genre contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in and remember the access token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account and remember the access token
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },

    /// Forget the stored access token
    Logout,

    /// Show the logged-in user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show AI recommendations for a user
    Recommend {
        /// User ID
        user_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Semantic search through the backend
    Search {
        /// Free-text query
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show reading stats and current borrowings
    Dashboard {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Borrow a book
    Borrow {
        /// Book ID
        book_id: BookId,
    },

    /// Return a borrowed book
    Return {
        /// Borrowing ID (shown by `biblio dashboard`)
        borrowing_id: BookId,
    },

    /// Show reviews of a book
    Reviews {
        /// Book ID
        book_id: BookId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show books similar to a book
    Similar {
        /// Book ID
        book_id: BookId,

        /// Maximum number of suggestions
        #[arg(short, long, default_value_t = 5)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check backend health
    Health {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "biblio_cli=debug,biblio_core=debug"
    } else {
        "biblio_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Browsing the catalog must work even without a place to keep credentials
    let browsing = matches!(cli.command, Commands::Books { .. });
    let client = commands::build_client(cli.api_url.as_deref(), cli.timeout, browsing)?;

    match cli.command {
        Commands::Books { search, json } => commands::books(client, search.as_deref(), json).await,

        Commands::Login { email, password } => commands::login(&client, &email, &password).await,

        Commands::Register {
            email,
            password,
            name,
            phone,
        } => commands::register(&client, &email, &password, name, phone).await,

        Commands::Logout => commands::logout(&client).await,

        Commands::Whoami { json } => commands::whoami(&client, json).await,

        Commands::Recommend { user_id, json } => {
            commands::recommend(&client, &user_id, json).await
        }

        Commands::Search { query, json } => commands::search(&client, &query, json).await,

        Commands::Dashboard { json } => commands::dashboard(&client, json).await,

        Commands::Borrow { book_id } => commands::borrow(&client, &book_id).await,

        Commands::Return { borrowing_id } => commands::return_book(&client, &borrowing_id).await,

        Commands::Reviews { book_id, json } => commands::reviews(&client, &book_id, json).await,

        Commands::Similar {
            book_id,
            limit,
            json,
        } => commands::similar(&client, &book_id, limit, json).await,

        Commands::Health { json } => commands::health(&client, json).await,
    }
}
