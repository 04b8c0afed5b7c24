use crate::dto::category_dto::{CreateCategoryPayload, UpdateCategoryPayload};
use crate::error::{Error, Result};
use crate::models::category::Category;
use crate::services::audit_service::AuditService;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str = "id, name, description, created_at, updated_at";

#[derive(Clone)]
pub struct CategoryService {
    pool: PgPool,
    audit: AuditService,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories ORDER BY name",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>(&format!(
            "SELECT {} FROM categories WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))
    }

    pub async fn create(&self, payload: CreateCategoryPayload) -> Result<Category> {
        let taken: Option<Uuid> = sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
            .bind(&payload.name)
            .fetch_optional(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(Error::Conflict(
                "A category with this name already exists".to_string(),
            ));
        }

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            INSERT INTO categories (id, name, description)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "create", "category", Some(category.id), None)
            .await;
        Ok(category)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCategoryPayload) -> Result<Category> {
        self.find_by_id(id).await?;

        if let Some(name) = &payload.name {
            let taken: Option<Uuid> =
                sqlx::query_scalar("SELECT id FROM categories WHERE name = $1 AND id <> $2")
                    .bind(name)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            if taken.is_some() {
                return Err(Error::Conflict(
                    "A category with this name already exists".to_string(),
                ));
            }
        }

        let category = sqlx::query_as::<_, Category>(&format!(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "category", Some(id), None)
            .await;
        Ok(category)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Category not found".to_string()));
        }
        self.audit
            .record(None, "delete", "category", Some(id), None)
            .await;
        Ok(())
    }

    /// All-or-nothing: every id must exist or nothing is deleted.
    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<()> {
        // Duplicate ids in the request must not trip the existence check.
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut tx = self.pool.begin().await?;

        let found: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM categories WHERE id = ANY($1)")
                .bind(&ids)
                .fetch_all(&mut *tx)
                .await?;
        if found.len() != ids.len() {
            let missing: Vec<String> = ids
                .iter()
                .filter(|id| !found.contains(id))
                .map(|id| id.to_string())
                .collect();
            return Err(Error::NotFound(format!(
                "Categories not found: {}",
                missing.join(", ")
            )));
        }

        sqlx::query("DELETE FROM categories WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.audit
            .record(
                None,
                "delete_many",
                "category",
                None,
                Some(json!({ "ids": ids })),
            )
            .await;
        Ok(())
    }
}
