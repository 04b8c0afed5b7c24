use crate::error::Error;
use crate::utils::token::{self, Claims};
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Identity of the caller, inserted into request extensions once the bearer
/// token has been validated and its subject resolved to a live user.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: uuid::Uuid,
    pub email: String,
}

/// Decodes the bearer token if one is present. Absent or malformed
/// Authorization headers pass through unauthenticated; `require_auth` on the
/// protected routes rejects those later. An expired token short-circuits
/// immediately so the client gets the TOKEN_EXPIRED code.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let Some(bearer) = header.and_then(|v| v.strip_prefix("Bearer ")) else {
        return next.run(req).await;
    };

    let config = crate::config::get_config();
    let claims: Claims = match token::decode_token(&config.jwt_secret, bearer) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    // Subject must still resolve to a user; tokens outlive account deletion.
    let user = match state.user_service.find_by_email(&claims.sub).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Error::Unauthorized("Unknown token subject".to_string()).into_response()
        }
        Err(err) => return err.into_response(),
    };

    req.extensions_mut().insert(AuthUser {
        id: user.id,
        email: user.email,
    });
    req.extensions_mut().insert(claims);
    next.run(req).await
}

/// Guard for protected routers: rejects requests that reached this point
/// without an authenticated identity.
pub async fn require_auth(req: Request, next: Next) -> Response {
    if req.extensions().get::<AuthUser>().is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "status": 401,
                "error": "Unauthorized",
                "message": "Authentication required",
            })),
        )
            .into_response();
    }
    next.run(req).await
}
