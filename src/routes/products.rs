use actix_multipart::form::MultipartForm;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::FieldErrors;
use crate::forms::products::{ProductForm, ProductListParams};
use crate::repository::DieselRepository;
use crate::routes::{created, deleted, error_response, ok, validation_response};
use crate::services::products as service;
use crate::storage::LocalImageStore;

/// Filtered, paginated product listing.
///
/// Parameters are parsed with `serde_qs` so malformed numbers surface as a
/// validation error instead of the extractor's default response.
#[get("/products")]
pub async fn index_products(req: HttpRequest, repo: web::Data<DieselRepository>) -> HttpResponse {
    let params = match serde_qs::from_str::<ProductListParams>(req.query_string()) {
        Ok(params) => params,
        Err(err) => {
            log::warn!("Rejected product list query: {err}");
            return validation_response(FieldErrors::single("query", err.to_string()));
        }
    };

    match service::list_products(repo.get_ref(), params) {
        Ok(page) => ok(page),
        Err(err) => error_response(err, "Failed to list products"),
    }
}

#[get("/products/{id}")]
pub async fn show_product(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> HttpResponse {
    match service::show_product(repo.get_ref(), path.into_inner()) {
        Ok(product) => ok(product),
        Err(err) => error_response(err, "Failed to load product"),
    }
}

#[post("/products")]
pub async fn store_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> HttpResponse {
    match service::create_product(repo.get_ref(), store.get_ref(), form) {
        Ok(product) => {
            log::info!("{} created product {}", user.sub, product.product.id);
            created(product, "Product created successfully.")
        }
        Err(err) => error_response(err, "Failed to create product"),
    }
}

#[post("/products/{id}")]
pub async fn update_product(
    _user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> HttpResponse {
    match service::update_product(repo.get_ref(), store.get_ref(), path.into_inner(), form) {
        Ok(product) => ok(product),
        Err(err) => error_response(err, "Failed to update product"),
    }
}

#[delete("/products/{id}")]
pub async fn destroy_product(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
) -> HttpResponse {
    let id = path.into_inner();
    match service::delete_product(repo.get_ref(), store.get_ref(), id) {
        Ok(()) => {
            log::info!("{} deleted product {id}", user.sub);
            deleted("Product deleted successfully.")
        }
        Err(err) => error_response(err, "Failed to delete product"),
    }
}
