use crate::dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload};
use crate::error::{Error, Result};
use crate::models::user::{self, User};
use crate::services::audit_service::AuditService;
use crate::utils::{crypto, token};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    pool: PgPool,
    audit: AuditService,
}

impl AuthService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<AuthResponse> {
        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "A user with this email address already exists".to_string(),
            ));
        }

        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, status, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&password_hash)
        .bind(user::STATUS_ACTIVE)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(Some(user.id), "register", "user", Some(user.id), None)
            .await;

        let token = self.issue_for(&user.email)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<AuthResponse> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, status, created_at, updated_at
            FROM users WHERE email = $1
            "#,
        )
        .bind(&payload.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        if user.status == user::STATUS_LOCKED {
            return Err(Error::Unauthorized("Account is locked".to_string()));
        }

        let ok = crypto::verify_password(&payload.password, &user.password_hash)
            .map_err(|e| Error::Internal(format!("Password verification failed: {}", e)))?;
        if !ok {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }

        let token = self.issue_for(&user.email)?;
        Ok(AuthResponse {
            token,
            user: user.into(),
        })
    }

    fn issue_for(&self, email: &str) -> Result<String> {
        let config = crate::config::get_config();
        token::issue(&config.jwt_secret, email, config.jwt_expiration_hours)
    }
}
