use crate::dto::attendance_dto::{
    AttendanceListQuery, ClockInPayload, ClockOutPayload, UpdateAttendancePayload,
};
use crate::error::{Error, Result};
use crate::models::attendance::{Attendance, AttendanceStatus};
use crate::services::audit_service::AuditService;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

const COLUMNS: &str = "id, user_id, date, clock_in_time, clock_out_time, total_hours, status, \
                       notes, created_at, updated_at";

#[derive(Clone)]
pub struct AttendanceService {
    pool: PgPool,
    audit: AuditService,
}

impl AttendanceService {
    pub fn new(pool: PgPool) -> Self {
        let audit = AuditService::new(pool.clone());
        Self { pool, audit }
    }

    /// Opens the day's attendance record. At most one record exists per user
    /// per calendar day; the status is derived from how far past the standard
    /// start the clock-in falls.
    pub async fn clock_in(&self, payload: ClockInPayload) -> Result<Attendance> {
        let user_exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE id = $1")
            .bind(payload.user_id)
            .fetch_optional(&self.pool)
            .await?;
        if user_exists.is_none() {
            return Err(Error::NotFound("User not found".to_string()));
        }

        let timestamp = payload.timestamp.unwrap_or_else(Utc::now);
        let date = timestamp.date_naive();

        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM attendance WHERE user_id = $1 AND date = $2")
                .bind(payload.user_id)
                .bind(date)
                .fetch_optional(&self.pool)
                .await?;
        if existing.is_some() {
            return Err(Error::Conflict(
                "User already has an attendance record for this date".to_string(),
            ));
        }

        let config = crate::config::get_config();
        let status = clock_in_status(
            timestamp,
            config.workday_start,
            Duration::minutes(config.late_threshold_minutes),
        );

        let attendance = sqlx::query_as::<_, Attendance>(&format!(
            r#"
            INSERT INTO attendance (id, user_id, date, clock_in_time, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(payload.user_id)
        .bind(date)
        .bind(timestamp)
        .bind(status.as_str())
        .bind(&payload.notes)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(
                Some(payload.user_id),
                "clock_in",
                "attendance",
                Some(attendance.id),
                Some(json!({ "status": status.as_str() })),
            )
            .await;
        Ok(attendance)
    }

    /// Closes the record: fails if already clocked out, computes total hours
    /// and derives EARLY_DEPARTURE unless the record is already LATE.
    pub async fn clock_out(&self, id: Uuid, payload: ClockOutPayload) -> Result<Attendance> {
        let record = self.find_by_id(id).await?;

        if record.clock_out_time.is_some() {
            return Err(Error::Conflict(
                "Attendance record is already clocked out".to_string(),
            ));
        }
        let clock_in = record.clock_in_time.ok_or_else(|| {
            Error::Conflict("Attendance record has no clock-in time".to_string())
        })?;

        let timestamp = payload.timestamp.unwrap_or_else(Utc::now);
        if timestamp < clock_in {
            return Err(Error::BadRequest(
                "Clock-out time precedes clock-in time".to_string(),
            ));
        }

        let total_hours = (timestamp - clock_in).num_seconds() as f64 / 3600.0;

        let config = crate::config::get_config();
        let current: AttendanceStatus = record
            .status
            .parse()
            .map_err(Error::Internal)?;
        let status = clock_out_status(
            current,
            timestamp,
            config.workday_end,
            Duration::minutes(config.early_departure_threshold_minutes),
        );

        let attendance = sqlx::query_as::<_, Attendance>(&format!(
            r#"
            UPDATE attendance
            SET clock_out_time = $2,
                total_hours = $3,
                status = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(timestamp)
        .bind(total_hours)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(
                Some(record.user_id),
                "clock_out",
                "attendance",
                Some(id),
                Some(json!({ "status": status.as_str(), "total_hours": total_hours })),
            )
            .await;
        Ok(attendance)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Attendance> {
        sqlx::query_as::<_, Attendance>(&format!(
            "SELECT {} FROM attendance WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Attendance record not found".to_string()))
    }

    pub async fn list(&self, query: AttendanceListQuery) -> Result<Vec<Attendance>> {
        let mut sql = format!("SELECT {} FROM attendance", COLUMNS);
        let mut clauses = Vec::new();
        if query.user_id.is_some() {
            clauses.push(format!("user_id = ${}", clauses.len() + 1));
        }
        if query.date.is_some() {
            clauses.push(format!("date = ${}", clauses.len() + 1));
        }
        if query.status.is_some() {
            clauses.push(format!("status = ${}", clauses.len() + 1));
        }
        if query.from.is_some() {
            clauses.push(format!("date >= ${}", clauses.len() + 1));
        }
        if query.to.is_some() {
            clauses.push(format!("date <= ${}", clauses.len() + 1));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY date DESC, created_at DESC");

        let mut statement = sqlx::query_as::<_, Attendance>(&sql);
        if let Some(user_id) = query.user_id {
            statement = statement.bind(user_id);
        }
        if let Some(date) = query.date {
            statement = statement.bind(date);
        }
        if let Some(status) = query.status {
            statement = statement.bind(status.as_str());
        }
        if let Some(from) = query.from {
            statement = statement.bind(from);
        }
        if let Some(to) = query.to {
            statement = statement.bind(to);
        }

        let records = statement.fetch_all(&self.pool).await?;
        Ok(records)
    }

    /// Manual correction (status override, notes). ABSENT and ON_LEAVE are
    /// only ever set this way.
    pub async fn update(&self, id: Uuid, payload: UpdateAttendancePayload) -> Result<Attendance> {
        self.find_by_id(id).await?;

        let attendance = sqlx::query_as::<_, Attendance>(&format!(
            r#"
            UPDATE attendance
            SET status = COALESCE($2, status),
                notes = COALESCE($3, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(id)
        .bind(payload.status.map(|s| s.as_str().to_string()))
        .bind(&payload.notes)
        .fetch_one(&self.pool)
        .await?;

        self.audit
            .record(None, "update", "attendance", Some(id), None)
            .await;
        Ok(attendance)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Attendance record not found".to_string()));
        }
        self.audit
            .record(None, "delete", "attendance", Some(id), None)
            .await;
        Ok(())
    }
}

/// LATE when the clock-in falls more than `late_threshold` past the standard
/// start of the workday, PRESENT otherwise.
fn clock_in_status(
    clock_in: DateTime<Utc>,
    workday_start: NaiveTime,
    late_threshold: Duration,
) -> AttendanceStatus {
    if clock_in.time() > workday_start + late_threshold {
        AttendanceStatus::Late
    } else {
        AttendanceStatus::Present
    }
}

/// EARLY_DEPARTURE when the clock-out precedes the standard end of the
/// workday by more than `early_threshold`. LATE takes precedence and is never
/// downgraded.
fn clock_out_status(
    current: AttendanceStatus,
    clock_out: DateTime<Utc>,
    workday_end: NaiveTime,
    early_threshold: Duration,
) -> AttendanceStatus {
    if current == AttendanceStatus::Late {
        return AttendanceStatus::Late;
    }
    // Signed gap: NaiveTime addition wraps at midnight and would misclassify
    // late-evening clock-outs.
    if workday_end.signed_duration_since(clock_out.time()) > early_threshold {
        AttendanceStatus::EarlyDeparture
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    fn start() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    fn end() -> NaiveTime {
        NaiveTime::from_hms_opt(17, 0, 0).unwrap()
    }

    #[test]
    fn on_time_clock_in_is_present() {
        let status = clock_in_status(at(8, 55), start(), Duration::minutes(15));
        assert_eq!(status, AttendanceStatus::Present);
    }

    #[test]
    fn clock_in_within_threshold_is_present() {
        let status = clock_in_status(at(9, 15), start(), Duration::minutes(15));
        assert_eq!(status, AttendanceStatus::Present);
    }

    #[test]
    fn clock_in_past_threshold_is_late() {
        let status = clock_in_status(at(9, 16), start(), Duration::minutes(15));
        assert_eq!(status, AttendanceStatus::Late);
    }

    #[test]
    fn leaving_early_marks_early_departure() {
        let status = clock_out_status(
            AttendanceStatus::Present,
            at(16, 30),
            end(),
            Duration::minutes(15),
        );
        assert_eq!(status, AttendanceStatus::EarlyDeparture);
    }

    #[test]
    fn leaving_within_threshold_keeps_status() {
        let status = clock_out_status(
            AttendanceStatus::Present,
            at(16, 50),
            end(),
            Duration::minutes(15),
        );
        assert_eq!(status, AttendanceStatus::Present);
    }

    #[test]
    fn clock_out_near_midnight_is_not_early_departure() {
        let status = clock_out_status(
            AttendanceStatus::Present,
            at(23, 50),
            end(),
            Duration::minutes(15),
        );
        assert_eq!(status, AttendanceStatus::Present);
    }

    #[test]
    fn late_is_never_downgraded_by_early_departure() {
        let status = clock_out_status(
            AttendanceStatus::Late,
            at(12, 0),
            end(),
            Duration::minutes(15),
        );
        assert_eq!(status, AttendanceStatus::Late);
    }
}
