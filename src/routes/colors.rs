use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::ReferenceListParams;
use crate::forms::colors::{CreateColorForm, UpdateColorForm};
use crate::repository::DieselRepository;
use crate::routes::{created, deleted, error_response, ok};
use crate::services::{ServiceError, colors as service};

#[get("/colors")]
pub async fn index_colors(
    params: web::Query<ReferenceListParams>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    let result = params
        .into_inner()
        .into_query()
        .map_err(ServiceError::from)
        .and_then(|query| service::list_colors(repo.get_ref(), query));

    match result {
        Ok(colors) => ok(colors),
        Err(err) => error_response(err, "Failed to list colors"),
    }
}

#[get("/colors/{id}")]
pub async fn show_color(path: web::Path<i32>, repo: web::Data<DieselRepository>) -> HttpResponse {
    match service::show_color(repo.get_ref(), path.into_inner()) {
        Ok(color) => ok(color),
        Err(err) => error_response(err, "Failed to load color"),
    }
}

#[post("/colors")]
pub async fn store_color(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<CreateColorForm>,
) -> HttpResponse {
    match service::create_color(repo.get_ref(), form.into_inner()) {
        Ok(color) => created(color, "Color created successfully."),
        Err(err) => error_response(err, "Failed to create color"),
    }
}

#[put("/colors/{id}")]
pub async fn update_color(
    _user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateColorForm>,
) -> HttpResponse {
    match service::update_color(repo.get_ref(), path.into_inner(), form.into_inner()) {
        Ok(color) => ok(color),
        Err(err) => error_response(err, "Failed to update color"),
    }
}

#[delete("/colors/{id}")]
pub async fn destroy_color(
    _user: AuthenticatedUser,
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> HttpResponse {
    match service::delete_color(repo.get_ref(), path.into_inner()) {
        Ok(()) => deleted("Color deleted successfully."),
        Err(err) => error_response(err, "Failed to delete color"),
    }
}
