use crate::dto::product_dto::{CreateProductPayload, ProductListQuery, UpdateProductPayload};
use crate::error::{Error, Result};
use crate::models::product::Product;
use crate::services::audit_service::AuditService;
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str =
    "id, name, description, cost_price, sale_price, category_id, created_at, updated_at";

#[derive(Clone)]
pub struct ProductService {
    pool: PgPool,
    audit: AuditService,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn list(&self, query: ProductListQuery) -> Result<Vec<Product>> {
        let mut sql = format!("SELECT {} FROM products", COLUMNS);
        let mut clauses = Vec::new();
        if query.category_id.is_some() {
            clauses.push(format!("category_id = ${}", clauses.len() + 1));
        }
        if query.search.is_some() {
            clauses.push(format!("name ILIKE ${}", clauses.len() + 1));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY name");

        let mut statement = sqlx::query_as::<_, Product>(&sql);
        if let Some(category_id) = query.category_id {
            statement = statement.bind(category_id);
        }
        if let Some(search) = query.search {
            statement = statement.bind(format!("%{}%", search));
        }
        let products = statement.fetch_all(&self.pool).await?;
        Ok(products)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Product> {
        sqlx::query_as::<_, Product>(&format!("SELECT {} FROM products WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Product not found".to_string()))
    }

    pub async fn create(&self, payload: CreateProductPayload) -> Result<Product> {
        check_prices(Some(payload.cost_price), Some(payload.sale_price))?;
        if let Some(category_id) = payload.category_id {
            self.check_category(category_id).await?;
        }

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (id, name, description, cost_price, sale_price, category_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.cost_price)
        .bind(payload.sale_price)
        .bind(payload.category_id)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "create", "product", Some(product.id), None)
            .await;
        Ok(product)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateProductPayload) -> Result<Product> {
        self.find_by_id(id).await?;
        check_prices(payload.cost_price, payload.sale_price)?;
        if let Some(category_id) = payload.category_id {
            self.check_category(category_id).await?;
        }

        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                cost_price = COALESCE($4, cost_price),
                sale_price = COALESCE($5, sale_price),
                category_id = COALESCE($6, category_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.cost_price)
        .bind(payload.sale_price)
        .bind(payload.category_id)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "product", Some(id), None)
            .await;
        Ok(product)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Product not found".to_string()));
        }
        self.audit
            .record(None, "delete", "product", Some(id), None)
            .await;
        Ok(())
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<()> {
        // Duplicate ids in the request must not trip the existence check.
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut tx = self.pool.begin().await?;

        let found: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM products WHERE id = ANY($1)")
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
                "Products not found: {}",
                missing.join(", ")
            )));
        }

        sqlx::query("DELETE FROM products WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.audit
            .record(
                None,
                "delete_many",
                "product",
                None,
                Some(json!({ "ids": ids })),
            )
            .await;
        Ok(())
    }

    async fn check_category(&self, category_id: Uuid) -> Result<()> {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM categories WHERE id = $1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Category not found".to_string()));
        }
        Ok(())
    }
}

fn check_prices(cost: Option<Decimal>, sale: Option<Decimal>) -> Result<()> {
    if cost.is_some_and(|c| c < Decimal::ZERO) {
        return Err(Error::BadRequest("cost_price must not be negative".into()));
    }
    if sale.is_some_and(|s| s < Decimal::ZERO) {
        return Err(Error::BadRequest("sale_price must not be negative".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_prices_are_rejected() {
        assert!(check_prices(Some(Decimal::NEGATIVE_ONE), None).is_err());
        assert!(check_prices(None, Some(Decimal::NEGATIVE_ONE)).is_err());
        assert!(check_prices(Some(Decimal::ZERO), Some(Decimal::ONE)).is_ok());
        assert!(check_prices(None, None).is_ok());
    }
}
