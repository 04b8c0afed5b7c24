use crate::dto::supplier_dto::{CreateSupplierPayload, UpdateSupplierPayload};
use crate::error::{Error, Result};
use crate::models::supplier::Supplier;
use crate::services::audit_service::AuditService;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str =
    "id, name, contact_person, email, phone, address, created_at, updated_at";

#[derive(Clone)]
pub struct SupplierService {
    pool: PgPool,
    audit: AuditService,
}

impl SupplierService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers ORDER BY name",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Supplier> {
        sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Supplier not found".to_string()))
    }

    pub async fn create(&self, payload: CreateSupplierPayload) -> Result<Supplier> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            INSERT INTO suppliers (id, name, contact_person, email, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.contact_person)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "create", "supplier", Some(supplier.id), None)
            .await;
        Ok(supplier)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateSupplierPayload) -> Result<Supplier> {
        self.find_by_id(id).await?;

        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            UPDATE suppliers
            SET name = COALESCE($2, name),
                contact_person = COALESCE($3, contact_person),
                email = COALESCE($4, email),
                phone = COALESCE($5, phone),
                address = COALESCE($6, address),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.contact_person)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "supplier", Some(id), None)
            .await;
        Ok(supplier)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Supplier not found".to_string()));
        }
        self.audit
            .record(None, "delete", "supplier", Some(id), None)
            .await;
        Ok(())
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<()> {
        // Duplicate ids in the request must not trip the existence check.
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut tx = self.pool.begin().await?;

        let found: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM suppliers WHERE id = ANY($1)")
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
                "Suppliers not found: {}",
                missing.join(", ")
            )));
        }

        sqlx::query("DELETE FROM suppliers WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.audit
            .record(
                None,
                "delete_many",
                "supplier",
                None,
                Some(json!({ "ids": ids })),
            )
            .await;
        Ok(())
    }
}
