use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::ReferenceListParams;
use crate::forms::categories::{CreateCategoryForm, UpdateCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{created, deleted, error_response, ok};
use crate::services::{ServiceError, categories as service};
use crate::storage::LocalImageStore;

#[get("/categories")]
pub async fn index_categories(
    params: web::Query<ReferenceListParams>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let result = params
        .into_inner()
        .into_query()
        .map_err(ServiceError::from)
        .and_then(|query| service::list_categories(repo.get_ref(), query));

    match result {
        Ok(categories) => ok(categories),
        Err(err) => error_response(err, "Failed to list categories"),
    }
}

#[get("/categories/{id}")]
pub async fn show_category(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> HttpResponse {
    match service::show_category(repo.get_ref(), path.into_inner()) {
        Ok(category) => ok(category),
        Err(err) => error_response(err, "Failed to load category"),
    }
}

#[post("/categories")]
pub async fn store_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateCategoryForm>,
) -> HttpResponse {
    match service::create_category(repo.get_ref(), form.into_inner()) {
        Ok(category) => {
            log::info!("{} created category {}", user.sub, category.slug);
            created(category, "Category created successfully.")
        }
        Err(err) => error_response(err, "Failed to create category"),
    }
}

#[put("/categories/{id}")]
pub async fn update_category(
    _user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateCategoryForm>,
) -> HttpResponse {
    match service::update_category(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(category) => ok(category),
        Err(err) => error_response(err, "Failed to update category"),
    }
}

#[delete("/categories/{id}")]
pub async fn destroy_category(
    user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<LocalImageStore>,
) -> HttpResponse {
    let id = path.into_inner();
    match service::delete_category(repo.get_ref(), store.get_ref(), id) {
        Ok(()) => {
            log::info!("{} deleted category {id}", user.sub);
            deleted("Category deleted successfully.")
        }
        Err(err) => error_response(err, "Failed to delete category"),
    }
}
