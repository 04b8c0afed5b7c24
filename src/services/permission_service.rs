use crate::dto::permission_dto::{CreatePermissionPayload, UpdatePermissionPayload};
use crate::error::{Error, Result};
use crate::models::permission::Permission;
use crate::services::audit_service::AuditService;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str = "id, name, resource, action, description, created_at, updated_at";

#[derive(Clone)]
pub struct PermissionService {
    pool: PgPool,
    audit: AuditService,
}

impl PermissionService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<Permission>> {
        let permissions = sqlx::query_as::<_, Permission>(&format!(
            "SELECT {} FROM permissions ORDER BY resource, action",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(permissions)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Permission> {
        sqlx::query_as::<_, Permission>(&format!(
            "SELECT {} FROM permissions WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Permission not found".to_string()))
    }

    pub async fn create(&self, payload: CreatePermissionPayload) -> Result<Permission> {
        let taken: Option<Uuid> = sqlx::query_scalar("SELECT id FROM permissions WHERE name = $1")
            .bind(&payload.name)
            .fetch_optional(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(Error::Conflict(
                "A permission with this name already exists".to_string(),
            ));
        }

        let permission = sqlx::query_as::<_, Permission>(&format!(
            r#"
            INSERT INTO permissions (id, name, resource, action, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.resource)
        .bind(&payload.action)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "create", "permission", Some(permission.id), None)
            .await;
        Ok(permission)
    }

    pub async fn update(&self, id: Uuid, payload: UpdatePermissionPayload) -> Result<Permission> {
        self.find_by_id(id).await?;

        let permission = sqlx::query_as::<_, Permission>(&format!(
            r#"
            UPDATE permissions
            SET name = COALESCE($2, name),
                resource = COALESCE($3, resource),
                action = COALESCE($4, action),
                description = COALESCE($5, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.resource)
        .bind(&payload.action)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "permission", Some(id), None)
            .await;
        Ok(permission)
    }

    /// A permission still assigned to any role cannot be deleted.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.find_by_id(id).await?;

        let assigned: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM role_permissions WHERE permission_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if assigned > 0 {
            return Err(Error::Conflict(format!(
                "Permission is still assigned to {} role(s)",
                assigned
            )));
        }

        sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.audit
            .record(None, "delete", "permission", Some(id), None)
            .await;
        Ok(())
    }
}
