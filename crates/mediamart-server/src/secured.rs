// Authorization helper for write endpoints.
//
// The auth middleware leaves an AuthContext on every request; the secured!
// macro turns that into a 401/403 early return or the authenticated user.

use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use uuid::Uuid;

use mediamart_auth::model::AuthContext;
use mediamart_persistence::UserRole;

use crate::model::response::ErrorResult;

/// The authenticated caller of a secured endpoint.
#[derive(Clone, Copy, Debug)]
pub struct RequestUser {
    pub id: Uuid,
    pub role: UserRole,
}

/// Validate the request's auth context against an allowed role set.
///
/// Missing or invalid token yields 401, a valid token with a role outside
/// the set yields 403.
pub fn check_roles(req: &HttpRequest, roles: &[UserRole]) -> Result<RequestUser, HttpResponse> {
    let extensions = req.extensions();

    let context = match extensions.get::<AuthContext>() {
        Some(context) => context,
        None => {
            return Err(ErrorResult::http_response_unauthorized(
                "no auth context found",
                req.path(),
            ));
        }
    };

    if !context.token_provided {
        return Err(ErrorResult::http_response_unauthorized(
            "no token provided",
            req.path(),
        ));
    }

    if context.jwt_error.is_some() {
        return Err(ErrorResult::http_response_unauthorized(
            &context.jwt_error_string(),
            req.path(),
        ));
    }

    match (context.user_id, context.role) {
        (Some(id), Some(role)) => {
            if roles.contains(&role) {
                Ok(RequestUser { id, role })
            } else {
                Err(ErrorResult::http_response_forbidden(
                    "authorization failed",
                    req.path(),
                ))
            }
        }
        _ => Err(ErrorResult::http_response_unauthorized(
            "no token provided",
            req.path(),
        )),
    }
}

#[macro_export]
macro_rules! secured {
    ($req:expr, $($role:expr),+ $(,)?) => {
        match $crate::secured::check_roles($req, &[$($role),+]) {
            Ok(user) => user,
            Err(response) => return response,
        }
    };
}
