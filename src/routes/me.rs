use actix_web::{HttpResponse, get};

use crate::auth::AuthenticatedUser;
use crate::routes::ok;

#[get("/me")]
/// Identity carried by the caller's bearer token.
pub async fn show_me(user: AuthenticatedUser) -> HttpResponse {
    ok(user)
}
