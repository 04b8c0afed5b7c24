use crate::dto::notification_dto::{
    CreateNotificationPreferencePayload, UpdateNotificationPreferencePayload,
};
use crate::error::{Error, Result};
use crate::models::notification_preference::{
    NotificationPreference, NOTIFICATION_CHANNELS, NOTIFICATION_TYPES,
};
use crate::services::audit_service::AuditService;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str =
    "id, user_id, notification_type, channel, enabled, created_at, updated_at";

#[derive(Clone)]
pub struct NotificationPreferenceService {
    pool: PgPool,
    audit: AuditService,
}

impl NotificationPreferenceService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<NotificationPreference>> {
        let preferences = sqlx::query_as::<_, NotificationPreference>(&format!(
            "SELECT {} FROM notification_preferences ORDER BY user_id, notification_type",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(preferences)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<NotificationPreference> {
        sqlx::query_as::<_, NotificationPreference>(&format!(
            "SELECT {} FROM notification_preferences WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Notification preference not found".to_string()))
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<NotificationPreference>> {
        let preferences = sqlx::query_as::<_, NotificationPreference>(&format!(
            "SELECT {} FROM notification_preferences WHERE user_id = $1 ORDER BY notification_type",
            COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(preferences)
    }

    /// At most one preference per (user, type).
    pub async fn create(
        &self,
        payload: CreateNotificationPreferencePayload,
    ) -> Result<NotificationPreference> {
        let notification_type = normalize(&payload.notification_type, &NOTIFICATION_TYPES)
            .ok_or_else(|| {
                Error::BadRequest(format!(
                    "Invalid notification type: {}",
                    payload.notification_type
                ))
            })?;
        let channel = normalize(&payload.channel, &NOTIFICATION_CHANNELS).ok_or_else(|| {
            Error::BadRequest(format!("Invalid notification channel: {}", payload.channel))
        })?;

        let user_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
            .bind(payload.user_id)
            .fetch_optional(&self.pool)
            .await?;
        if user_exists.is_none() {
            return Err(Error::NotFound("User not found".to_string()));
        }

        let existing: Option<Uuid> = sqlx::query_scalar(
            "SELECT id FROM notification_preferences WHERE user_id = $1 AND notification_type = $2",
        )
        .bind(payload.user_id)
        .bind(&notification_type)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "User already has a preference for this notification type".to_string(),
            ));
        }

        let preference = sqlx::query_as::<_, NotificationPreference>(&format!(
            r#"
            INSERT INTO notification_preferences (id, user_id, notification_type, channel, enabled)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(payload.user_id)
        .bind(&notification_type)
        .bind(&channel)
        .bind(payload.enabled.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(
                Some(payload.user_id),
                "create",
                "notification_preference",
                Some(preference.id),
                Some(json!({ "type": notification_type, "channel": channel })),
            )
            .await;
        Ok(preference)
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: UpdateNotificationPreferencePayload,
    ) -> Result<NotificationPreference> {
        self.find_by_id(id).await?;

        let channel = match &payload.channel {
            Some(raw) => Some(normalize(raw, &NOTIFICATION_CHANNELS).ok_or_else(|| {
                Error::BadRequest(format!("Invalid notification channel: {}", raw))
            })?),
            None => None,
        };

        let preference = sqlx::query_as::<_, NotificationPreference>(&format!(
            r#"
            UPDATE notification_preferences
            SET channel = COALESCE($2, channel),
                enabled = COALESCE($3, enabled),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(channel)
        .bind(payload.enabled)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "notification_preference", Some(id), None)
            .await;
        Ok(preference)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM notification_preferences WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(
                "Notification preference not found".to_string(),
            ));
        }
        self.audit
            .record(None, "delete", "notification_preference", Some(id), None)
            .await;
        Ok(())
    }

    pub async fn delete_many(&self, ids: &[Uuid]) -> Result<()> {
        // Duplicate ids in the request must not trip the existence check.
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut tx = self.pool.begin().await?;

        let found: Vec<Uuid> =
            sqlx::query_scalar("SELECT id FROM notification_preferences WHERE id = ANY($1)")
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
                "Notification preferences not found: {}",
                missing.join(", ")
            )));
        }

        sqlx::query("DELETE FROM notification_preferences WHERE id = ANY($1)")
            .bind(&ids)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        self.audit
            .record(
                None,
                "delete_many",
                "notification_preference",
                None,
                Some(json!({ "ids": ids })),
            )
            .await;
        Ok(())
    }
}

fn normalize(raw: &str, allowed: &[&str]) -> Option<String> {
    let upper = raw.to_uppercase();
    allowed.contains(&upper.as_str()).then_some(upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn types_and_channels_are_validated() {
        assert_eq!(normalize("email", &NOTIFICATION_TYPES).as_deref(), Some("EMAIL"));
        assert_eq!(normalize("Weekly", &NOTIFICATION_CHANNELS).as_deref(), Some("WEEKLY"));
        assert!(normalize("pigeon", &NOTIFICATION_TYPES).is_none());
    }
}
