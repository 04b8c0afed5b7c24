use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

/// Records mutating service calls as domain events.
#[derive(Clone)]
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Best-effort: a failed audit insert is logged and swallowed so it never
    /// turns an already-committed mutation into an error for the caller.
    pub async fn record(
        &self,
        user_id: Option<Uuid>,
        action: &str,
        entity_type: &str,
        entity_id: Option<Uuid>,
        changes: Option<JsonValue>,
    ) {
        let result = sqlx::query(
            r#"
            INSERT INTO audit_logs (id, user_id, action, entity_type, entity_id, changes)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(action)
        .bind(entity_type)
        .bind(entity_id)
        .bind(changes)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => tracing::info!(action, entity_type, entity_id = ?entity_id, "audit event"),
            Err(err) => {
                tracing::warn!(error = %err, action, entity_type, "failed to write audit log")
            }
        }
    }
}
