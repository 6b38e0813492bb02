//! JSON API handlers mounted under `/api`.

use actix_multipart::form::MultipartFormConfig;
use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::forms::FieldErrors;
use crate::services::ServiceError;

pub mod categories;
pub mod colors;
pub mod me;
pub mod product_types;
pub mod products;
pub mod shapes;

/// Largest multipart body accepted for product forms.
const MULTIPART_TOTAL_LIMIT: usize = 16 * 1024 * 1024;

/// Envelope wrapping every JSON response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Machine-readable error code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            errors: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    pub fn failure(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(code.to_string()),
            errors: None,
        }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
            errors: None,
        }
    }
}

pub(crate) fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(data))
}

pub(crate) fn created<T: Serialize>(data: T, message: &str) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::success(data).with_message(message))
}

pub(crate) fn deleted(message: &str) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::done(message))
}

pub(crate) fn validation_response(errors: FieldErrors) -> HttpResponse {
    let mut body = ApiResponse::failure("validation_failed", "The given data was invalid.");
    body.errors = Some(errors);
    HttpResponse::UnprocessableEntity().json(body)
}

/// Turn a malformed request body or query string into a 422 envelope.
fn malformed_request(detail: &str) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(ApiResponse::failure(
        "malformed_request",
        format!("The request could not be parsed: {detail}"),
    ))
}

/// Log a service failure and render the matching envelope. Internal details
/// stay in the log.
pub(crate) fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    match err {
        ServiceError::Validation(errors) => {
            log::warn!("{context}: {errors}");
            validation_response(errors)
        }
        ServiceError::NotFound => {
            log::warn!("{context}: not found");
            HttpResponse::NotFound().json(ApiResponse::failure("not_found", "Resource not found."))
        }
        err @ (ServiceError::Persistence(_) | ServiceError::Storage(_)) => {
            log::error!("{context}: {err}");
            HttpResponse::InternalServerError()
                .json(ApiResponse::failure("internal_error", "Internal server error."))
        }
    }
}

/// Register every API route plus the extractor configs that keep malformed
/// input inside the envelope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = malformed_request(&err.to_string());
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = malformed_request(&err.to_string());
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound()
            .json(ApiResponse::failure("not_found", "Resource not found."));
        InternalError::from_response(err, response).into()
    }))
    .app_data(
        MultipartFormConfig::default()
            .total_limit(MULTIPART_TOTAL_LIMIT)
            .error_handler(|err, _req| {
                let response = malformed_request(&err.to_string());
                InternalError::from_response(err, response).into()
            }),
    )
    .service(
        web::scope("/api")
            .service(me::show_me)
            .service(product_types::index_product_types)
            .service(product_types::store_product_type)
            .service(product_types::show_product_type)
            .service(product_types::update_product_type)
            .service(product_types::destroy_product_type)
            .service(categories::index_categories)
            .service(categories::store_category)
            .service(categories::show_category)
            .service(categories::update_category)
            .service(categories::destroy_category)
            .service(colors::index_colors)
            .service(colors::store_color)
            .service(colors::show_color)
            .service(colors::update_color)
            .service(colors::destroy_color)
            .service(shapes::index_shapes)
            .service(shapes::store_shape)
            .service(shapes::show_shape)
            .service(shapes::update_shape)
            .service(shapes::destroy_shape)
            .service(products::index_products)
            .service(products::store_product)
            .service(products::show_product)
            .service(products::update_product)
            .service(products::destroy_product),
    );
}
