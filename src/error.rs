use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::Validation(_) | Error::Json(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Unauthorized(_) | Error::TokenExpired => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let message = match &self {
            Error::Config(_) | Error::Database(_) | Error::Io(_) | Error::Internal(_) => {
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let mut body = json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Unknown"),
            "message": message,
        });

        if let Error::Validation(errors) = &self {
            let mut fields = serde_json::Map::new();
            for (field, violations) in errors.field_errors() {
                let messages: Vec<String> = violations
                    .iter()
                    .map(|v| {
                        v.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| v.code.to_string())
                    })
                    .collect();
                fields.insert(field.to_string(), json!(messages));
            }
            body["errors"] = json!(fields);
        }

        if matches!(self, Error::TokenExpired) {
            body["code"] = json!("TOKEN_EXPIRED");
        }

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Error::Conflict("Resource already exists".to_string())
            }
            other => Error::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(err: Error) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_renders_404_with_uniform_body() {
        let (status, body) = body_of(Error::NotFound("Category not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"], "Not Found");
        assert!(body["message"].as_str().unwrap().contains("Category"));
        assert!(body["timestamp"].is_string());
        assert!(body.get("code").is_none());
    }

    #[tokio::test]
    async fn conflict_renders_409() {
        let (status, body) = body_of(Error::Conflict("Email already registered".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["status"], 409);
    }

    #[tokio::test]
    async fn expired_token_carries_code() {
        let (status, body) = body_of(Error::TokenExpired).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "TOKEN_EXPIRED");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let (status, body) = body_of(Error::Internal("pool exhausted".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An unexpected error occurred");
    }
}
