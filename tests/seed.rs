use jewelry_catalog::domain::ReferenceListQuery;
use jewelry_catalog::domain::product::ProductListQuery;
use jewelry_catalog::repository::{
    CategoryReader, ColorReader, ProductReader, ProductTypeReader, RepositoryError, ShapeReader,
};
use jewelry_catalog::seed::{PURITIES, SeedSummary, seed_demo_products, seed_reference_data};

mod common;

#[test]
fn test_reference_seed_is_idempotent() {
    let test_db = common::TestDb::new("test_reference_seed_is_idempotent.db");
    let repo = test_db.repo();

    let first = seed_reference_data(&repo).unwrap();
    assert_eq!(
        first,
        SeedSummary {
            product_types: 3,
            categories: 5,
            colors: 5,
            shapes: 6,
        }
    );

    let second = seed_reference_data(&repo).unwrap();
    assert_eq!(second, SeedSummary::default());

    let all = ReferenceListQuery::new();
    assert_eq!(repo.list_product_types(all).unwrap().len(), 3);
    assert_eq!(repo.list_categories(all).unwrap().len(), 5);
    assert_eq!(repo.list_colors(all).unwrap().len(), 5);
    assert_eq!(repo.list_shapes(all).unwrap().len(), 6);
    assert_eq!(
        repo.get_category_by_name("Loose Stones")
            .unwrap()
            .map(|c| c.slug),
        Some("loose-stones".to_string())
    );
}

#[test]
fn test_demo_products_need_reference_data() {
    let test_db = common::TestDb::new("test_demo_products_need_reference_data.db");
    let repo = test_db.repo();

    let err = seed_demo_products(&repo, 5).expect_err("no reference rows yet");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_demo_products_are_complete_and_unique() {
    let test_db = common::TestDb::new("test_demo_products_are_complete_and_unique.db");
    let repo = test_db.repo();
    seed_reference_data(&repo).unwrap();

    assert_eq!(seed_demo_products(&repo, 12).unwrap(), 12);
    assert_eq!(seed_demo_products(&repo, 12).unwrap(), 0);

    let (total, products) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 12);
    for details in &products {
        let product = &details.product;
        assert!(product.sku.starts_with("DEMO-"));
        assert!(details.product_type.is_some());
        assert!(details.category.is_some());
        assert!(details.color.is_some());
        assert!(details.shape.is_some());
        assert_eq!(product.weight_unit, "grams");
        assert!(PURITIES.contains(&product.purity.as_deref().unwrap_or_default()));
        assert!(product.price_cents > 0);
    }
}
