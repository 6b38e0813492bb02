//! Seed the catalog with reference data and demo products.
//!
//! Usage: `seed [COUNT]` (default 50 products).

use dotenvy::dotenv;

use jewelry_catalog::db::establish_connection_pool;
use jewelry_catalog::repository::DieselRepository;
use jewelry_catalog::seed::{DEFAULT_DEMO_PRODUCTS, seed_demo_products, seed_reference_data};

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok();

    let count = match std::env::args().nth(1) {
        Some(raw) => match raw.parse::<usize>() {
            Ok(count) => count,
            Err(_) => {
                log::error!("Product count must be a non-negative integer, got `{raw}`");
                std::process::exit(2);
            }
        },
        None => DEFAULT_DEMO_PRODUCTS,
    };

    let database_url = std::env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    if let Err(e) = seed_reference_data(&repo) {
        log::error!("Failed to seed reference data: {e}");
        std::process::exit(1);
    }

    match seed_demo_products(&repo, count) {
        Ok(inserted) => log::info!("Done: {inserted} products inserted"),
        Err(e) => {
            log::error!("Failed to seed demo products: {e}");
            std::process::exit(1);
        }
    }
}
