//! # Seed Data Generator
//!
//! Populates an inventory database with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Generate 200 products (default)
//! cargo run -p stockroom-db --bin seed
//!
//! # Generate custom amount into a specific file
//! cargo run -p stockroom-db --bin seed -- --count 1000 --db ./data/inventory.db
//!
//! # Import products from a JSON array instead
//! cargo run -p stockroom-db --bin seed -- --json products.json
//! ```
//!
//! ## JSON Format
//! ```json
//! [
//!   { "name": "Hex bolt", "description": "M6 x 20", "quantity": 250, "price": 0.12 },
//!   { "name": "Wood glue" }
//! ]
//! ```
//! Missing `description`, `quantity` and `price` default to empty / zero.

use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use stockroom_core::{NewProduct, DEFAULT_DATABASE_FILE};
use stockroom_db::{Database, DbConfig, ProductRepository};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Product families for realistic test data
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "Fasteners",
        &[
            "Hex bolt",
            "Carriage bolt",
            "Wood screw",
            "Drywall screw",
            "Machine screw",
            "Wing nut",
            "Lock washer",
            "Rivet",
        ],
    ),
    (
        "Tools",
        &[
            "Claw hammer",
            "Screwdriver",
            "Adjustable wrench",
            "Tape measure",
            "Utility knife",
            "Pliers",
            "Hand saw",
            "Spirit level",
        ],
    ),
    (
        "Supplies",
        &[
            "Wood glue",
            "Duct tape",
            "Sandpaper",
            "Paint brush",
            "Masking tape",
            "Cable ties",
            "Work gloves",
            "Safety glasses",
        ],
    ),
];

/// Variants with a price addon in cents
const VARIANTS: &[(&str, i64)] = &[("Small", 0), ("Medium", 150), ("Large", 400)];

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
struct SeedArgs {
    count: usize,
    db_path: PathBuf,
    json_path: Option<PathBuf>,
}

impl Default for SeedArgs {
    fn default() -> Self {
        SeedArgs {
            count: 200,
            db_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            json_path: None,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(args) = parse_args(&args)? else {
        print_help();
        return Ok(());
    };

    let products = match &args.json_path {
        Some(path) => parse_products(&std::fs::read_to_string(path)?)?,
        None => generate_products(args.count),
    };

    println!("Stockroom Seed Data Generator");
    println!("=============================");
    println!("Database: {}", args.db_path.display());
    println!("Products: {}", products.len());
    println!();

    let db = Database::new(DbConfig::new(&args.db_path)).await?;

    let existing = db.products().count().await?;
    if existing > 0 && args.json_path.is_none() {
        println!("Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    let start = std::time::Instant::now();
    let (inserted, skipped) = insert_all(&db.products(), &products).await;

    let elapsed = start.elapsed();
    println!();
    println!(
        "Inserted {} products in {:?} ({} skipped)",
        inserted, elapsed, skipped
    );

    db.close().await;
    Ok(())
}

/// Parses arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
fn parse_args(args: &[String]) -> Result<Option<SeedArgs>, ParseIntError> {
    let mut parsed = SeedArgs::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            flag @ ("--count" | "-c" | "--db" | "-d" | "--json" | "-j") => {
                let Some(value) = iter.next() else {
                    warn!(argument = %flag, "Ignoring option without a value");
                    continue;
                };
                match flag {
                    "--count" | "-c" => parsed.count = value.parse()?,
                    "--db" | "-d" => parsed.db_path = PathBuf::from(value),
                    _ => parsed.json_path = Some(PathBuf::from(value)),
                }
            }
            "--help" | "-h" => return Ok(None),
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
    }

    Ok(Some(parsed))
}

fn print_help() {
    println!("Stockroom Seed Data Generator");
    println!();
    println!("Usage: seed [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --count <N>     Number of products to generate (default: 200)");
    println!("  -d, --db <PATH>     Database file path (default: ./inventory.db)");
    println!("  -j, --json <FILE>   Import products from a JSON array instead");
    println!("  -h, --help          Show this help message");
}

/// Parses a JSON array of products; missing fields take their defaults.
fn parse_products(raw: &str) -> serde_json::Result<Vec<NewProduct>> {
    serde_json::from_str(raw)
}

/// Inserts every product, logging and skipping failures.
///
/// Returns `(inserted, skipped)`.
async fn insert_all(repo: &ProductRepository, products: &[NewProduct]) -> (usize, usize) {
    let mut inserted = 0;
    let mut skipped = 0;

    for product in products {
        if let Err(e) = repo.insert(product).await {
            error!(name = %product.name, error = %e, "Failed to insert product");
            skipped += 1;
            continue;
        }

        inserted += 1;

        if inserted % 100 == 0 {
            println!("  Inserted {} products...", inserted);
        }
    }

    (inserted, skipped)
}

/// Generates `count` demo products, cycling through families and variants.
fn generate_products(count: usize) -> Vec<NewProduct> {
    let catalog: Vec<(&str, &str, &str, i64)> = FAMILIES
        .iter()
        .flat_map(|(family, names)| {
            names.iter().flat_map(move |name| {
                VARIANTS
                    .iter()
                    .map(move |(variant, addon)| (*family, *name, *variant, *addon))
            })
        })
        .collect();

    (0..count)
        .map(|seed| {
            let (family, name, variant, addon) = catalog[seed % catalog.len()];
            generate_product(family, name, variant, addon, seed)
        })
        .collect()
}

/// Generates a single product with realistic data.
fn generate_product(
    family: &str,
    name: &str,
    variant: &str,
    price_addon: i64,
    seed: usize,
) -> NewProduct {
    // Base price $0.99 - $19.99 plus the variant addon, kept in cents until the end
    let price_cents = 99 + ((seed * 37) % 1900) as i64 + price_addon;

    // Stock 0 - 250
    let quantity = ((seed * 13) % 251) as i64;

    NewProduct::new(
        format!("{} {}", name, variant),
        format!("{} #{:04}", family, seed),
        quantity,
        price_cents as f64 / 100.0,
    )
}
