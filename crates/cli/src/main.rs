//! Naked Pineapple cart CLI - inspect and edit the persisted shopping cart.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! np-cart show
//!
//! # Add an item (merges with an existing line of the same ID)
//! np-cart add --id mug --product-id mug --name "Pineapple Mug" --price-cents 1200
//!
//! # Set a quantity; zero or negative removes the line
//! np-cart update mug 3
//! np-cart update mug -- -1
//!
//! # Remove a line, or everything
//! np-cart remove mug
//! np-cart clear
//!
//! # Print the checkout lines as JSON
//! np-cart export
//! ```
//!
//! # Configuration
//!
//! Reads `CART_STORAGE_DIR`, `CART_STORAGE_KEY`, `CART_CURRENCY` and
//! `SENTRY_DSN` from the environment (or `.env`). `--storage-dir` and `--key`
//! override the first two.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use naked_pineapple_cart::CartConfig;
use naked_pineapple_cart::storage::validate_key;
use naked_pineapple_core::CartLineItem;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "np-cart")]
#[command(author, version, about = "Naked Pineapple cart tools")]
struct Cli {
    /// Directory holding the cart slot (overrides `CART_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    /// Cart slot key (overrides `CART_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List line items and totals
    Show,
    /// Add an item to the cart
    Add(AddArgs),
    /// Remove a line item
    Remove {
        /// Line item ID
        id: String,
    },
    /// Set a line item's quantity (0 or less removes it)
    Update {
        /// Line item ID
        id: String,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every line item
    Clear,
    /// Print the checkout lines as JSON
    Export,
}

#[derive(clap::Args)]
struct AddArgs {
    /// Line item ID (unique per product/variant combination)
    #[arg(long)]
    id: String,

    /// Product ID
    #[arg(long)]
    product_id: String,

    /// Product display name
    #[arg(short, long)]
    name: String,

    /// Unit price in minor currency units
    #[arg(long, allow_negative_numbers = true)]
    price_cents: i64,

    /// Number of units
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    quantity: i64,

    /// Variant ID
    #[arg(long)]
    variant_id: Option<String>,

    /// Selected variant option as NAME=VALUE (repeatable)
    #[arg(long = "option", value_parser = parse_option)]
    options: Vec<(String, String)>,

    /// Image URL
    #[arg(long)]
    image_url: Option<String>,

    /// Seller ID
    #[arg(long)]
    seller_id: Option<String>,
}

impl From<AddArgs> for CartLineItem {
    fn from(args: AddArgs) -> Self {
        let mut item = Self::new(
            args.id,
            args.product_id,
            args.name,
            args.quantity,
            args.price_cents,
        );
        if let Some(variant_id) = args.variant_id {
            item = item.with_variant(variant_id);
        }
        for (name, value) in args.options {
            item = item.with_option(name, value);
        }
        if let Some(url) = args.image_url {
            item = item.with_image_url(url);
        }
        if let Some(seller_id) = args.seller_id {
            item = item.with_seller(seller_id);
        }
        item
    }
}

fn parse_option(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("option name cannot be empty".to_string());
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CartConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration first (needed for Sentry init)
    let config = CartConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so command output on stdout stays machine-readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "naked_pineapple_cart=info,np_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if sentry_guard.is_some() {
        tracing::info!("Sentry initialized");
    }

    let result = config
        .map_err(CliError::from)
        .and_then(|config| run(cli, config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, mut config: CartConfig) -> Result<(), CliError> {
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(key) = cli.key {
        validate_key(&key)?;
        config.storage_key = key;
    }

    let mut store = config.open_store()?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Show => commands::cart::show(&store, config.currency, &mut out),
        Commands::Add(args) => commands::cart::add(&mut store, args.into(), &mut out),
        Commands::Remove { id } => commands::cart::remove(&mut store, &id, &mut out),
        Commands::Update { id, quantity } => {
            commands::cart::update(&mut store, &id, quantity, &mut out)
        }
        Commands::Clear => commands::cart::clear(&mut store, &mut out),
        Commands::Export => commands::cart::export(&store, &mut out),
    }
}
