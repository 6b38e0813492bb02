use std::io::Write;

use actix_multipart::form::{tempfile::TempFile, text::Text};
use tempfile::{NamedTempFile, TempDir};

use jewelry_catalog::domain::ReferenceListQuery;
use jewelry_catalog::domain::color::NewColor;
use jewelry_catalog::domain::product::ImageSlot;
use jewelry_catalog::forms::categories::CreateCategoryForm;
use jewelry_catalog::forms::products::{ProductForm, ProductListParams};
use jewelry_catalog::repository::{ColorWriter, ProductReader};
use jewelry_catalog::services::{ServiceError, categories, products};
use jewelry_catalog::storage::LocalImageStore;

mod common;

fn text(value: &str) -> Option<Text<String>> {
    Some(Text(value.to_string()))
}

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_BYTES: &[u8] = b"\xFF\xD8\xFF\xE0";
const GIF_BYTES: &[u8] = b"GIF89a";

fn image_upload(bytes: &[u8], name: &str) -> Option<TempFile> {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(bytes).expect("write image");
    Some(TempFile {
        file,
        content_type: None,
        file_name: Some(name.to_string()),
        size: bytes.len(),
    })
}

fn png(name: &str) -> Option<TempFile> {
    image_upload(PNG_BYTES, name)
}

fn ring_form(name: &str, sku: &str, type_id: i32, category_id: i32, price: &str) -> ProductForm {
    ProductForm {
        name: text(name),
        sku: text(sku),
        product_type_id: text(&type_id.to_string()),
        category_id: text(&category_id.to_string()),
        price: text(price),
        stock: text("3"),
        ..Default::default()
    }
}

#[test]
fn test_create_and_filter_products() {
    let test_db = common::TestDb::new("test_create_and_filter_products.db");
    let repo = test_db.repo();
    let storage = TempDir::new().unwrap();
    let store = LocalImageStore::new(storage.path());
    let jewelry = common::jewelry_type(&repo);
    let rings = common::rings(&repo);

    products::create_product(
        &repo,
        &store,
        ring_form("Gold Ring", "GR-1", jewelry.id, rings.id, "199.99"),
    )
    .unwrap();
    products::create_product(
        &repo,
        &store,
        ring_form("Silver Band", "SB-1", jewelry.id, rings.id, "49.5"),
    )
    .unwrap();

    let page = products::list_products(
        &repo,
        ProductListParams {
            search: Some("Gold".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].product.sku, "GR-1");
    assert_eq!(page.data[0].product.price_cents, 19_999);

    let page = products::list_products(
        &repo,
        ProductListParams {
            max_price: Some("100".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].product.sku, "SB-1");

    let page = products::list_products(
        &repo,
        ProductListParams {
            page: Some(usize::MAX),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(page.total, 2);
    assert!(page.data.is_empty());

    let err = products::list_products(
        &repo,
        ProductListParams {
            min_price: Some("cheap".to_string()),
            ..Default::default()
        },
    )
    .expect_err("non-numeric price bound");
    assert!(matches!(err, ServiceError::Validation(ref errors) if errors.contains("min_price")));
}

#[test]
fn test_unknown_references_write_nothing() {
    let test_db = common::TestDb::new("test_unknown_references_write_nothing.db");
    let repo = test_db.repo();
    let storage = TempDir::new().unwrap();
    let store = LocalImageStore::new(storage.path());
    let jewelry = common::jewelry_type(&repo);

    let mut form = ring_form("Ghost Ring", "GH-1", jewelry.id, 999, "10");
    form.image_1 = png("ghost.png");

    let err = products::create_product(&repo, &store, form).expect_err("unknown category");
    match err {
        ServiceError::Validation(errors) => {
            assert!(errors.contains("category_id"));
            assert!(!errors.contains("product_type_id"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    assert!(repo.get_product_by_sku("GH-1").unwrap().is_none());
    let stored = std::fs::read_dir(storage.path().join("products"))
        .map(|dir| dir.count())
        .unwrap_or(0);
    assert_eq!(stored, 0);
}

#[test]
fn test_disguised_script_is_not_stored() {
    let test_db = common::TestDb::new("test_disguised_script_is_not_stored.db");
    let repo = test_db.repo();
    let storage = TempDir::new().unwrap();
    let store = LocalImageStore::new(storage.path());
    let jewelry = common::jewelry_type(&repo);
    let rings = common::rings(&repo);

    let mut form = ring_form("Gold Ring", "GR-1", jewelry.id, rings.id, "10");
    form.image_1 = image_upload(b"#!/bin/sh\nrm -rf /\n", "evil.png");

    let err = products::create_product(&repo, &store, form).expect_err("not an image");
    assert!(matches!(err, ServiceError::Validation(ref errors) if errors.contains("image_1")));
    assert!(repo.get_product_by_sku("GR-1").unwrap().is_none());
    assert!(!storage.path().join("products").exists());
}

#[test]
fn test_duplicate_sku_reports_every_error() {
    let test_db = common::TestDb::new("test_duplicate_sku_reports_every_error.db");
    let repo = test_db.repo();
    let storage = TempDir::new().unwrap();
    let store = LocalImageStore::new(storage.path());
    let jewelry = common::jewelry_type(&repo);
    let rings = common::rings(&repo);

    products::create_product(
        &repo,
        &store,
        ring_form("Gold Ring", "GR-1", jewelry.id, rings.id, "10"),
    )
    .unwrap();

    let err = products::create_product(
        &repo,
        &store,
        ring_form("", "GR-1", jewelry.id, rings.id, "-1"),
    )
    .expect_err("invalid form");
    match err {
        ServiceError::Validation(errors) => {
            assert!(errors.contains("name"));
            assert!(errors.contains("sku"));
            assert!(errors.contains("price"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_image_replacement_and_soft_delete() {
    let test_db = common::TestDb::new("test_image_replacement_and_soft_delete.db");
    let repo = test_db.repo();
    let storage = TempDir::new().unwrap();
    let store = LocalImageStore::new(storage.path());
    let jewelry = common::jewelry_type(&repo);
    let rings = common::rings(&repo);
    let gold = repo
        .create_color(&NewColor::new("Gold").with_hex_code("#FFD700"))
        .unwrap();

    let mut form = ring_form("Gold Ring", "GR-1", jewelry.id, rings.id, "120");
    form.color_id = text(&gold.id.to_string());
    form.image_1 = png("front.png");
    form.image_2 = png("side.PNG");
    let created = products::create_product(&repo, &store, form).unwrap();

    let first = created.product.image(ImageSlot::First).unwrap().to_string();
    let second = created.product.image(ImageSlot::Second).unwrap().to_string();
    assert!(first.starts_with("products/") && first.ends_with(".png"));
    assert!(storage.path().join(&first).exists());
    assert!(storage.path().join(&second).exists());

    let update = ProductForm {
        image_1: image_upload(JPEG_BYTES, "new-front.jpg"),
        color_id: text(""),
        ..Default::default()
    };
    let updated = products::update_product(&repo, &store, created.product.id, update).unwrap();

    let replacement = updated.product.image(ImageSlot::First).unwrap().to_string();
    assert_ne!(replacement, first);
    assert!(replacement.ends_with(".jpg"));
    assert!(storage.path().join(&replacement).exists());
    assert!(!storage.path().join(&first).exists(), "old blob removed");
    assert_eq!(updated.product.image(ImageSlot::Second), Some(second.as_str()));
    assert_eq!(updated.product.color_id, None);
    assert_eq!(updated.product.name, "Gold Ring");

    products::delete_product(&repo, &store, created.product.id).unwrap();
    assert!(!storage.path().join(&replacement).exists());
    assert!(!storage.path().join(&second).exists());
    assert!(matches!(
        products::show_product(&repo, created.product.id),
        Err(ServiceError::NotFound)
    ));

    // A soft-deleted product still holds its SKU.
    let err = products::create_product(
        &repo,
        &store,
        ring_form("Gold Ring", "GR-1", jewelry.id, rings.id, "120"),
    )
    .expect_err("sku is still taken");
    assert!(matches!(err, ServiceError::Validation(ref errors) if errors.contains("sku")));
}

#[test]
fn test_category_delete_removes_product_images() {
    let test_db = common::TestDb::new("test_category_delete_removes_product_images.db");
    let repo = test_db.repo();
    let storage = TempDir::new().unwrap();
    let store = LocalImageStore::new(storage.path());
    let jewelry = common::jewelry_type(&repo);

    let rings = categories::create_category(
        &repo,
        CreateCategoryForm {
            name: Some("Fine Rings".to_string()),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(rings.slug, "fine-rings");

    let mut form = ring_form("Gold Ring", "GR-1", jewelry.id, rings.id, "120");
    form.image_3 = image_upload(GIF_BYTES, "detail.gif");
    let created = products::create_product(&repo, &store, form).unwrap();
    let image = created.product.image(ImageSlot::Third).unwrap().to_string();
    assert!(storage.path().join(&image).exists());

    categories::delete_category(&repo, &store, rings.id).unwrap();

    assert!(!storage.path().join(&image).exists());
    assert!(
        categories::list_categories(&repo, ReferenceListQuery::new())
            .unwrap()
            .is_empty()
    );
    assert!(repo.get_product_by_sku("GR-1").unwrap().is_none());
}
