use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CONTENT_TYPE};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use jewelry_catalog::domain::product::NewProduct;
use jewelry_catalog::repository::ProductWriter;
use jewelry_catalog::routes;
use jewelry_catalog::storage::LocalImageStore;

mod common;

macro_rules! catalog_app {
    ($test_db:expr, $storage:expr) => {
        test::init_service(
            App::new()
                .configure(routes::configure)
                .app_data(web::Data::new($test_db.repo()))
                .app_data(web::Data::new(LocalImageStore::new($storage.path())))
                .app_data(web::Data::new(common::auth_config())),
        )
        .await
    };
}

#[actix_web::test]
async fn test_writes_require_bearer_token() {
    let test_db = common::TestDb::new("test_api_writes_require_bearer_token.db");
    let storage = TempDir::new().unwrap();
    let app = catalog_app!(test_db, storage);

    let req = test::TestRequest::post()
        .uri("/api/product-types")
        .set_json(json!({ "name": "Gemstone" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("unauthenticated"));

    let req = test::TestRequest::delete()
        .uri("/api/products/1")
        .insert_header((AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_echoes_token_subject() {
    let test_db = common::TestDb::new("test_api_me_echoes_token_subject.db");
    let storage = TempDir::new().unwrap();
    let app = catalog_app!(test_db, storage);

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header((AUTHORIZATION, common::bearer("admin@example.com")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["sub"], json!("admin@example.com"));
}

#[actix_web::test]
async fn test_reference_crud_uses_envelope() {
    let test_db = common::TestDb::new("test_api_reference_crud_uses_envelope.db");
    let storage = TempDir::new().unwrap();
    let app = catalog_app!(test_db, storage);
    let token = common::bearer("admin");

    let req = test::TestRequest::post()
        .uri("/api/colors")
        .insert_header((AUTHORIZATION, token.clone()))
        .set_json(json!({ "name": "Ruby Red", "hex_code": "#E0115F", "is_active": "1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], json!("Ruby Red"));
    assert!(body["message"].is_string());
    let id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/colors")
        .insert_header((AUTHORIZATION, token.clone()))
        .set_json(json!({ "name": "Ruby Red", "hex_code": "red" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], json!("validation_failed"));
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["hex_code"].is_array());

    let req = test::TestRequest::get()
        .uri(&format!("/api/colors/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["products"], json!([]));

    let req = test::TestRequest::get()
        .uri("/api/colors?is_active=false")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!([]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/colors/{id}"))
        .insert_header((AUTHORIZATION, token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/colors/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_input_is_unprocessable() {
    let test_db = common::TestDb::new("test_api_malformed_input_is_unprocessable.db");
    let storage = TempDir::new().unwrap();
    let app = catalog_app!(test_db, storage);

    let req = test::TestRequest::post()
        .uri("/api/shapes")
        .insert_header((AUTHORIZATION, common::bearer("admin")))
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));

    let req = test::TestRequest::get()
        .uri("/api/products?page=first")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let req = test::TestRequest::get()
        .uri("/api/products/abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_product_listing_paginates_and_formats_price() {
    let test_db = common::TestDb::new("test_api_product_listing.db");
    let storage = TempDir::new().unwrap();
    let repo = test_db.repo();
    let jewelry = common::jewelry_type(&repo);
    let rings = common::rings(&repo);
    for index in 1..=3 {
        repo.create_product(&NewProduct::new(
            format!("Gold Ring {index}"),
            format!("GR-{index}"),
            jewelry.id,
            rings.id,
            12_000 + index,
        ))
        .unwrap();
    }
    let app = catalog_app!(test_db, storage);

    let req = test::TestRequest::get()
        .uri("/api/products?search=Gold&per_page=2&page=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["total"], json!(3));
    assert_eq!(body["data"]["current_page"], json!(2));
    assert_eq!(body["data"]["last_page"], json!(2));
    let items = body["data"]["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["price"], json!("120.03"));
    assert_eq!(items[0]["category"]["slug"], json!("rings"));
    assert!(items[0].get("deleted_at").is_none());

    let req = test::TestRequest::get().uri("/api/products/999").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
