//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(name = "shoprag")]
#[command(about = "ShopRAG CLI tool for storefront product search and chat retrieval")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the product catalog
    Search {
        /// Search query
        query: String,
        /// Maximum number of results
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        top_k: Option<i64>,
        /// Show lexical and fuzzy components for every product
        #[arg(long)]
        explain: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// List products in the catalog
    Products {
        /// Maximum number of products to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Show which retriever a chat message is routed to
    Route {
        /// Chat message
        message: String,
    },
    /// Build the retrieval context and prompt for a chat message
    Context {
        /// Chat message
        message: String,
        /// Maximum number of products
        #[arg(short = 'k', long, allow_negative_numbers = true)]
        top_k: Option<i64>,
        /// Items already in the cart
        #[arg(long = "cart")]
        cart_items: Vec<String>,
        /// Print the full prompt instead of only the context
        #[arg(long)]
        prompt: bool,
    },
    /// Serve the HTTP API
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Disable CORS
        #[arg(long)]
        no_cors: bool,
    },
    /// Show current configuration
    Config,
}
