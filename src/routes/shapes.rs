use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::ReferenceListParams;
use crate::forms::shapes::{CreateShapeForm, UpdateShapeForm};
use crate::repository::DieselRepository;
use crate::routes::{created, deleted, error_response, ok};
use crate::services::{ServiceError, shapes as service};

#[get("/shapes")]
pub async fn index_shapes(
    params: web::Query<ReferenceListParams>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let result = params
        .into_inner()
        .into_query()
        .map_err(ServiceError::from)
        .and_then(|query| service::list_shapes(repo.get_ref(), query));

    match result {
        Ok(shapes) => ok(shapes),
        Err(err) => error_response(err, "Failed to list shapes"),
    }
}

#[get("/shapes/{id}")]
pub async fn show_shape(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> HttpResponse {
    match service::show_shape(repo.get_ref(), path.into_inner()) {
        Ok(shape) => ok(shape),
        Err(err) => error_response(err, "Failed to load shape"),
    }
}

#[post("/shapes")]
pub async fn store_shape(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateShapeForm>,
) -> HttpResponse {
    match service::create_shape(repo.get_ref(), form.into_inner()) {
        Ok(shape) => created(shape, "Shape created successfully."),
        Err(err) => error_response(err, "Failed to create shape"),
    }
}

#[put("/shapes/{id}")]
pub async fn update_shape(
    _user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateShapeForm>,
) -> HttpResponse {
    match service::update_shape(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(shape) => ok(shape),
        Err(err) => error_response(err, "Failed to update shape"),
    }
}

#[delete("/shapes/{id}")]
pub async fn destroy_shape(
    _user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match service::delete_shape(repo.get_ref(), path.into_inner()) {
        Ok(()) => deleted("Shape deleted successfully."),
        Err(err) => error_response(err, "Failed to delete shape"),
    }
}
