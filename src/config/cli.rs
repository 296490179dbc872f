use crate::domain::model::{Currency, ProductWriteRequest};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "open-market")]
#[command(about = "Browse and manage marketplace listings")]
pub struct Cli {
    /// TOML configuration file; credentials fall back to MARKET_IDENTIFIER / MARKET_SECRET
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Overrides the server base URL from the configuration
    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Ping the server health endpoint
    Health,
    /// List products page by page
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        /// Defaults to the configured page size
        #[arg(long)]
        per_page: Option<u32>,
        /// Keep fetching until the last page
        #[arg(long)]
        all: bool,
    },
    /// Show a single product
    Detail { id: u64 },
    /// Register a product with one to five images
    Create {
        #[command(flatten)]
        product: ProductArgs,
        #[arg(long = "image", required = true)]
        images: Vec<PathBuf>,
    },
    /// Modify an existing product
    Update {
        id: u64,
        #[command(flatten)]
        product: ProductArgs,
        #[arg(long)]
        thumbnail_id: Option<u64>,
    },
    /// Look up the secret of a product
    Secret { id: u64 },
    /// Delete a product
    Delete {
        id: u64,
        /// Product secret; looked up first when omitted
        #[arg(long)]
        secret: Option<String>,
    },
    /// Download an image to a file
    Download {
        url: String,
        #[arg(long, short)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ProductArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub price: f64,
    #[arg(long, default_value = "0")]
    pub discounted_price: f64,
    #[arg(long, default_value = "KRW")]
    pub currency: Currency,
    #[arg(long, default_value = "0")]
    pub stock: u64,
}

impl ProductArgs {
    pub fn into_request(self, secret: &str, thumbnail_id: Option<u64>) -> ProductWriteRequest {
        ProductWriteRequest {
            name: self.name,
            description: self.description,
            price: self.price,
            currency: self.currency,
            discounted_price: self.discounted_price,
            stock: self.stock,
            secret: secret.to_string(),
            thumbnail_id,
        }
    }
}
