//! Helpers for integration tests.
#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use jewelry_catalog::auth::{AuthConfig, issue_token};
use jewelry_catalog::db::{DbPool, establish_connection_pool};
use jewelry_catalog::domain::category::{Category, NewCategory};
use jewelry_catalog::domain::product_type::{NewProductType, ProductType};
use jewelry_catalog::repository::{CategoryWriter, DieselRepository, ProductTypeWriter};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

pub const TEST_SECRET: &str = "integration-test-secret";

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        secret: TEST_SECRET.to_string(),
        token_ttl_minutes: 60,
    }
}

pub fn bearer(subject: &str) -> String {
    let token = issue_token(subject, 60, &auth_config()).expect("sign token");
    format!("Bearer {token}")
}

pub fn jewelry_type(repo: &DieselRepository) -> ProductType {
    repo.create_product_type(&NewProductType::new("Jewelry"))
        .expect("create product type")
}

pub fn rings(repo: &DieselRepository) -> Category {
    repo.create_category(&NewCategory::new("Rings", "rings"))
        .expect("create category")
}
