mod common;

use stationery_backend::services::audit_service::AuditService;

#[tokio::test]
async fn mutations_leave_audit_rows() {
    let Some((state, router)) = common::setup().await else {
        return;
    };
    let (_token, user_id, _) = common::register_user(&router).await;

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM audit_logs \
         WHERE entity_type = 'user' AND entity_id = $1 AND action = 'register'",
    )
    .bind(user_id)
    .fetch_one(&state.pool)
    .await
    .expect("count");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn audit_failure_does_not_fail_the_caller() {
    let Some((state, _router)) = common::setup().await else {
        return;
    };

    // A pool that can no longer reach the database makes the insert fail;
    // the call must still return normally.
    let audit = AuditService::new(state.pool.clone());
    state.pool.close().await;
    audit.record(None, "create", "category", None, None).await;
}
