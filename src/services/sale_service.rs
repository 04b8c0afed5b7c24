use crate::dto::sale_dto::{CreateSalePayload, SaleResponse};
use crate::error::{Error, Result};
use crate::models::product::Product;
use crate::models::sale::{Sale, SaleItem};
use crate::services::audit_service::AuditService;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

const SALE_COLUMNS: &str = "id, customer_id, total_amount, notes, created_at, updated_at";
const ITEM_COLUMNS: &str = "id, sale_id, product_id, quantity, unit_price, subtotal";

/// Sales are immutable once written: the sale row and its items are created
/// in one transaction and can only be read back or deleted afterwards.
#[derive(Clone)]
pub struct SaleService {
    pool: PgPool,
    audit: AuditService,
}

impl SaleService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn create(&self, payload: CreateSalePayload) -> Result<SaleResponse> {
        let mut tx = self.pool.begin().await?;

        if let Some(customer_id) = payload.customer_id {
            let exists: Option<Uuid> =
                sqlx::query_scalar("SELECT id FROM customers WHERE id = $1")
                    .bind(customer_id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if exists.is_none() {
                return Err(Error::NotFound("Customer not found".to_string()));
            }
        }

        // Price every line against the current catalog before writing anything.
        let mut lines = Vec::with_capacity(payload.items.len());
        let mut total = Decimal::ZERO;
        for item in &payload.items {
            let product = sqlx::query_as::<_, Product>(
                "SELECT id, name, description, cost_price, sale_price, category_id, created_at, updated_at FROM products WHERE id = $1",
            )
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Product not found: {}", item.product_id)))?;

            let subtotal = product.sale_price * Decimal::from(item.quantity);
            total += subtotal;
            lines.push((item.product_id, item.quantity, product.sale_price, subtotal));
        }

        let sale_id = Uuid::new_v4();
        let sale = sqlx::query_as::<_, Sale>(&format!(
            r#"
            INSERT INTO sales (id, customer_id, total_amount, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            SALE_COLUMNS
        ))
        .bind(sale_id)
        .bind(payload.customer_id)
        .bind(total)
        .bind(&payload.notes)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(lines.len());
        for (product_id, quantity, unit_price, subtotal) in lines {
            let row = sqlx::query_as::<_, SaleItem>(&format!(
                r#"
                INSERT INTO sale_items (id, sale_id, product_id, quantity, unit_price, subtotal)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {}
                "#,
                ITEM_COLUMNS
            ))
            .bind(Uuid::new_v4())
            .bind(sale_id)
            .bind(product_id)
            .bind(quantity)
            .bind(unit_price)
            .bind(subtotal)
            .fetch_one(&mut *tx)
            .await?;
            items.push(row);
        }

        tx.commit().await?;

        self.audit
            .record(None, "create", "sale", Some(sale.id), None)
            .await;
        Ok(SaleResponse { sale, items })
    }

    pub async fn find_all(&self) -> Result<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {} FROM sales ORDER BY created_at DESC",
            SALE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(sales)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<SaleResponse> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {} FROM sales WHERE id = $1",
            SALE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Sale not found".to_string()))?;

        let items = sqlx::query_as::<_, SaleItem>(&format!(
            "SELECT {} FROM sale_items WHERE sale_id = $1",
            ITEM_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(SaleResponse { sale, items })
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Sale not found".to_string()));
        }
        self.audit
            .record(None, "delete", "sale", Some(id), None)
            .await;
        Ok(())
    }
}
