pub mod attendance_service;
pub mod audit_service;
pub mod auth_service;
pub mod category_service;
pub mod customer_service;
pub mod notification_service;
pub mod payment_service;
pub mod permission_service;
pub mod product_service;
pub mod role_service;
pub mod sale_service;
pub mod schedule_service;
pub mod supplier_service;
pub mod user_service;
