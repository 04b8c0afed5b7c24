use crate::dto::schedule_dto::{
    CreateSchedulePayload, UpdateSchedulePayload, WeeklySchedulePayload,
};
use crate::error::{Error, Result};
use crate::models::schedule::{Schedule, DAYS_OF_WEEK};
use crate::services::audit_service::AuditService;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str =
    "id, user_id, day_of_week, start_time, end_time, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct ScheduleService {
    pool: PgPool,
    audit: AuditService,
}

impl ScheduleService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    pub async fn find_all(&self) -> Result<Vec<Schedule>> {
        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules ORDER BY user_id, day_of_week",
            COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(schedules)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Schedule> {
        sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Schedule not found".to_string()))
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Schedule>> {
        self.check_user(user_id).await?;
        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules WHERE user_id = $1 ORDER BY day_of_week",
            COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(schedules)
    }

    pub async fn create(&self, payload: CreateSchedulePayload) -> Result<Schedule> {
        self.check_user(payload.user_id).await?;
        let day = normalize_day(&payload.day_of_week)?;

        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            INSERT INTO schedules (id, user_id, day_of_week, start_time, end_time, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(payload.user_id)
        .bind(day)
        .bind(payload.start_time)
        .bind(payload.end_time)
        .bind(payload.is_active.unwrap_or(true))
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "create", "schedule", Some(schedule.id), None)
            .await;
        Ok(schedule)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateSchedulePayload) -> Result<Schedule> {
        self.find_by_id(id).await?;
        let day = match &payload.day_of_week {
            Some(raw) => Some(normalize_day(raw)?),
            None => None,
        };

        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            UPDATE schedules
            SET day_of_week = COALESCE($2, day_of_week),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(day)
        .bind(payload.start_time)
        .bind(payload.end_time)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "schedule", Some(id), None)
            .await;
        Ok(schedule)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Schedule not found".to_string()));
        }
        self.audit
            .record(None, "delete", "schedule", Some(id), None)
            .await;
        Ok(())
    }

    /// Creates seven per-day records from one start/end template.
    pub async fn generate_weekly(
        &self,
        user_id: Uuid,
        payload: WeeklySchedulePayload,
    ) -> Result<Vec<Schedule>> {
        self.check_user(user_id).await?;

        let mut tx = self.pool.begin().await?;
        let mut schedules = Vec::with_capacity(DAYS_OF_WEEK.len());
        for day in DAYS_OF_WEEK {
            let schedule = sqlx::query_as::<_, Schedule>(&format!(
                r#"
                INSERT INTO schedules (id, user_id, day_of_week, start_time, end_time, is_active)
                VALUES ($1, $2, $3, $4, $5, TRUE)
                RETURNING {}
                "#,
                COLUMNS
            ))
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(day)
            .bind(payload.start_time)
            .bind(payload.end_time)
            .fetch_one(&mut *tx)
            .await?;
            schedules.push(schedule);
        }
        tx.commit().await?;

        self.audit
            .record(None, "generate_weekly", "schedule", None, None)
            .await;
        Ok(schedules)
    }

    /// Duplicates the user's currently active schedules; fails when there is
    /// nothing to copy.
    pub async fn copy_from_previous_week(&self, user_id: Uuid) -> Result<Vec<Schedule>> {
        self.check_user(user_id).await?;

        let active = sqlx::query_as::<_, Schedule>(&format!(
            "SELECT {} FROM schedules WHERE user_id = $1 AND is_active = TRUE",
            COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        if active.is_empty() {
            return Err(Error::Conflict(
                "User has no active schedules to copy".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        let mut copies = Vec::with_capacity(active.len());
        for schedule in active {
            let copy = sqlx::query_as::<_, Schedule>(&format!(
                r#"
                INSERT INTO schedules (id, user_id, day_of_week, start_time, end_time, is_active)
                VALUES ($1, $2, $3, $4, $5, TRUE)
                RETURNING {}
                "#,
                COLUMNS
            ))
            .bind(Uuid::new_v4())
            .bind(user_id)
            .bind(&schedule.day_of_week)
            .bind(schedule.start_time)
            .bind(schedule.end_time)
            .fetch_one(&mut *tx)
            .await?;
            copies.push(copy);
        }
        tx.commit().await?;

        self.audit
            .record(None, "copy_previous_week", "schedule", None, None)
            .await;
        Ok(copies)
    }

    async fn check_user(&self, user_id: Uuid) -> Result<()> {
        let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(Error::NotFound("User not found".to_string()));
        }
        Ok(())
    }
}

fn normalize_day(raw: &str) -> Result<String> {
    let day = raw.to_uppercase();
    if !DAYS_OF_WEEK.contains(&day.as_str()) {
        return Err(Error::BadRequest(format!("Invalid day of week: {}", raw)));
    }
    Ok(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_names_are_normalized() {
        assert_eq!(normalize_day("monday").unwrap(), "MONDAY");
        assert_eq!(normalize_day("Friday").unwrap(), "FRIDAY");
        assert!(normalize_day("Someday").is_err());
    }
}
