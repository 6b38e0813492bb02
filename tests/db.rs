use jewelry_catalog::domain::ReferenceListQuery;
use jewelry_catalog::repository::ProductTypeReader;

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let base = "test_creates_and_removes_db_files.db";

    {
        let test_db = common::TestDb::new(base);
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
    }

    let db_path = std::path::Path::new(base);
    assert!(!db_path.exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}

#[test]
fn test_migrations_create_empty_catalog() {
    let test_db = common::TestDb::new("test_migrations_create_empty_catalog.db");
    let repo = test_db.repo();

    let types = repo.list_product_types(ReferenceListQuery::new()).unwrap();
    assert!(types.is_empty());
}
