//! # Seed Data Generator
//!
//! Populates the local ledger with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Seed into ./venta.db (default)
//! cargo run -p venta-db --bin seed
//!
//! # Specify database path
//! cargo run -p venta-db --bin seed -- --db ./data/venta.db
//! ```

use std::env;
use std::process::ExitCode;

use tracing::{error, info};

use venta_core::NewProduct;
use venta_db::{Database, DbConfig};

/// Demo catalog: (name, category, price, cost, stock, barcode).
const DEMO_PRODUCTS: &[(&str, &str, f64, f64, i64, &str)] = &[
    ("Agua 1L", "bebidas", 12.0, 7.5, 48, "7501055300001"),
    ("Refresco cola 600ml", "bebidas", 18.5, 11.0, 36, "7501055300002"),
    ("Jugo de naranja 1L", "bebidas", 28.0, 17.0, 24, "7501055300003"),
    ("Cafe molido 500g", "abarrotes", 95.0, 62.0, 12, "7501055300004"),
    ("Azucar 1kg", "abarrotes", 32.0, 21.0, 30, "7501055300005"),
    ("Arroz 1kg", "abarrotes", 29.5, 18.0, 40, "7501055300006"),
    ("Frijol negro 1kg", "abarrotes", 38.0, 24.0, 35, "7501055300007"),
    ("Pan de caja", "panaderia", 45.0, 28.0, 15, "7501055300008"),
    ("Galletas surtidas", "panaderia", 22.0, 13.5, 50, "7501055300009"),
    ("Leche entera 1L", "lacteos", 26.0, 19.0, 60, "7501055300010"),
    ("Queso fresco 400g", "lacteos", 58.0, 39.0, 18, "7501055300011"),
    ("Jabon de barra", "limpieza", 16.5, 9.0, 44, "7501055300012"),
];

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber_init();

    let db_path = parse_db_path().unwrap_or_else(|| "./venta.db".to_string());

    match seed(&db_path).await {
        Ok(count) => {
            info!(count, db = %db_path, "Seed complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Seed failed");
            ExitCode::FAILURE
        }
    }
}

async fn seed(db_path: &str) -> Result<usize, venta_db::StorageError> {
    let db = Database::new(DbConfig::new(db_path)).await?;
    let products = db.products();

    let mut inserted = 0;
    for (name, category, price, cost, stock, barcode) in DEMO_PRODUCTS {
        // Re-running the seed against an existing database skips rows whose
        // barcode is already present.
        if products.get_by_barcode(barcode).await?.is_some() {
            continue;
        }

        products
            .insert(&NewProduct {
                name: name.to_string(),
                description: None,
                price: *price,
                cost: Some(*cost),
                stock: *stock,
                barcode: Some(barcode.to_string()),
                category: Some(category.to_string()),
                image_url: None,
            })
            .await?;
        inserted += 1;
    }

    db.close().await;
    Ok(inserted)
}

/// Reads `--db <path>` from the command line.
fn parse_db_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    args.iter()
        .position(|a| a == "--db")
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn tracing_subscriber_init() {
    // The seed binary logs to stderr at info level unless RUST_LOG says
    // otherwise.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
