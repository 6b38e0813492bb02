use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::ReferenceListParams;
use crate::forms::product_types::{CreateProductTypeForm, UpdateProductTypeForm};
use crate::repository::DieselRepository;
use crate::routes::{created, deleted, error_response, ok};
use crate::services::{ServiceError, product_types as service};
use crate::storage::LocalImageStore;

#[get("/product-types")]
pub async fn index_product_types(
    params: web::Query<ReferenceListParams>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let result = params
        .into_inner()
        .into_query()
        .map_err(ServiceError::from)
        .and_then(|query| service::list_product_types(repo.get_ref(), query));

    match result {
        Ok(product_types) => ok(product_types),
        Err(err) => error_response(err, "Failed to list product types"),
    }
}

#[get("/product-types/{id}")]
pub async fn show_product_type(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match service::show_product_type(repo.get_ref(), path.into_inner()) {
        Ok(product_type) => ok(product_type),
        Err(err) => error_response(err, "Failed to load product type"),
    }
}

#[post("/product-types")]
pub async fn store_product_type(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateProductTypeForm>,
) -> HttpResponse {
    match service::create_product_type(repo.get_ref(), form.into_inner()) {
        Ok(product_type) => {
            log::info!("{} created product type {}", user.sub, product_type.id);
            created(product_type, "Product type created successfully.")
        }
        Err(err) => error_response(err, "Failed to create product type"),
    }
}

#[put("/product-types/{id}")]
pub async fn update_product_type(
    _user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateProductTypeForm>,
) -> HttpResponse {
    match service::update_product_type(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(product_type) => ok(product_type),
        Err(err) => error_response(err, "Failed to update product type"),
    }
}

#[delete("/product-types/{id}")]
pub async fn destroy_product_type(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
) -> HttpResponse {
    let id = path.into_inner();
    match service::delete_product_type(repo.get_ref(), store.get_ref(), id) {
        Ok(()) => {
            log::info!("{} deleted product type {id}", user.sub);
            deleted("Product type deleted successfully.")
        }
        Err(err) => error_response(err, "Failed to delete product type"),
    }
}
