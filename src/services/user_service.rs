use crate::dto::user_dto::{ChangePasswordPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::role::Role;
use crate::models::user::{self, User};
use crate::services::audit_service::AuditService;
use crate::utils::crypto;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, status, created_at, updated_at";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
    audit: AuditService,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("User not found".to_string()))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User> {
        self.find_by_id(id).await?;

        if let Some(email) = &payload.email {
            let taken: Option<Uuid> =
                sqlx::query_scalar("SELECT id FROM users WHERE email = $1 AND id <> $2")
                    .bind(email)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            if taken.is_some() {
                return Err(Error::Conflict(
                    "A user with this email address already exists".to_string(),
                ));
            }
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.email)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "user", Some(id), None)
            .await;
        Ok(user)
    }

    pub async fn change_password(&self, id: Uuid, payload: ChangePasswordPayload) -> Result<()> {
        self.find_by_id(id).await?;
        let password_hash = crypto::hash_password(&payload.password)
            .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?;

        sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;

        self.audit
            .record(Some(id), "change_password", "user", Some(id), None)
            .await;
        Ok(())
    }

    pub async fn set_status(&self, id: Uuid, status: &str) -> Result<User> {
        self.find_by_id(id).await?;
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            USER_COLUMNS
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "set_status", "user", Some(id), Some(json!({ "status": status })))
            .await;
        Ok(user)
    }

    pub async fn lock(&self, id: Uuid) -> Result<User> {
        self.set_status(id, user::STATUS_LOCKED).await
    }

    pub async fn unlock(&self, id: Uuid) -> Result<User> {
        self.set_status(id, user::STATUS_ACTIVE).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        self.audit
            .record(None, "delete", "user", Some(id), None)
            .await;
        Ok(())
    }

    pub async fn roles_of(&self, id: Uuid) -> Result<Vec<Role>> {
        self.find_by_id(id).await?;
        let roles = sqlx::query_as::<_, Role>(
            r#"
            SELECT r.id, r.name, r.description, r.created_at, r.updated_at
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<()> {
        self.find_by_id(user_id).await?;
        let role_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM roles WHERE id = $1")
            .bind(role_id)
            .fetch_optional(&self.pool)
            .await?;
        if role_exists.is_none() {
            return Err(Error::NotFound("Role not found".to_string()));
        }

        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;

        self.audit
            .record(
                None,
                "assign_role",
                "user",
                Some(user_id),
                Some(json!({ "role_id": role_id })),
            )
            .await;
        Ok(())
    }

    pub async fn remove_role(&self, user_id: Uuid, role_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM user_roles WHERE user_id = $1 AND role_id = $2")
            .bind(user_id)
            .bind(role_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(
                "Role is not assigned to this user".to_string(),
            ));
        }
        self.audit
            .record(
                None,
                "remove_role",
                "user",
                Some(user_id),
                Some(json!({ "role_id": role_id })),
            )
            .await;
        Ok(())
    }
}
