use crate::dto::role_dto::{CreateRolePayload, RoleWithPermissionsResponse, UpdateRolePayload};
use crate::error::{Error, Result};
use crate::models::permission::Permission;
use crate::models::role::Role;
use crate::services::audit_service::AuditService;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct RoleService {
    pool: PgPool,
    audit: AuditService,
}

impl RoleService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<Role>> {
        let roles = sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at, updated_at FROM roles ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Role> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at, updated_at FROM roles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Role not found".to_string()))
    }

    pub async fn get_with_permissions(&self, id: Uuid) -> Result<RoleWithPermissionsResponse> {
        let role = self.find_by_id(id).await?;
        let permissions = sqlx::query_as::<_, Permission>(
            r#"
            SELECT p.id, p.name, p.resource, p.action, p.description, p.created_at, p.updated_at
            FROM permissions p
            JOIN role_permissions rp ON rp.permission_id = p.id
            WHERE rp.role_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(RoleWithPermissionsResponse { role, permissions })
    }

    pub async fn create(&self, payload: CreateRolePayload) -> Result<Role> {
        let taken: Option<Uuid> = sqlx::query_scalar("SELECT id FROM roles WHERE name = $1")
            .bind(&payload.name)
            .fetch_optional(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(Error::Conflict(
                "A role with this name already exists".to_string(),
            ));
        }

        let role = sqlx::query_as::<_, Role>(
            r#"
            INSERT INTO roles (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "create", "role", Some(role.id), None)
            .await;
        Ok(role)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateRolePayload) -> Result<Role> {
        self.find_by_id(id).await?;

        let role = sqlx::query_as::<_, Role>(
            r#"
            UPDATE roles
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "role", Some(id), None)
            .await;
        Ok(role)
    }

    /// A role still held by any user cannot be deleted.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.find_by_id(id).await?;

        let holders: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_roles WHERE role_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        if holders > 0 {
            return Err(Error::Conflict(format!(
                "Role is still assigned to {} user(s)",
                holders
            )));
        }

        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM role_permissions WHERE role_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.audit
            .record(None, "delete", "role", Some(id), None)
            .await;
        Ok(())
    }

    pub async fn assign_permission(&self, role_id: Uuid, permission_id: Uuid) -> Result<()> {
        self.find_by_id(role_id).await?;
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM permissions WHERE id = $1")
            .bind(permission_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Permission not found".to_string()));
        }

        sqlx::query(
            "INSERT INTO role_permissions (role_id, permission_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(role_id)
        .bind(permission_id)
        .execute(&self.pool)
        .await?;

        self.audit
            .record(
                None,
                "assign_permission",
                "role",
                Some(role_id),
                Some(json!({ "permission_id": permission_id })),
            )
            .await;
        Ok(())
    }

    pub async fn remove_permission(&self, role_id: Uuid, permission_id: Uuid) -> Result<()> {
        let result =
            sqlx::query("DELETE FROM role_permissions WHERE role_id = $1 AND permission_id = $2")
                .bind(role_id)
                .bind(permission_id)
                .execute(&self.pool)
                .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(
                "Permission is not assigned to this role".to_string(),
            ));
        }
        self.audit
            .record(
                None,
                "remove_permission",
                "role",
                Some(role_id),
                Some(json!({ "permission_id": permission_id })),
            )
            .await;
        Ok(())
    }
}
