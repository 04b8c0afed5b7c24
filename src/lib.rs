pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    attendance_service::AttendanceService, auth_service::AuthService,
    category_service::CategoryService, customer_service::CustomerService,
    notification_service::NotificationPreferenceService, payment_service::PaymentService,
    permission_service::PermissionService, product_service::ProductService,
    role_service::RoleService, sale_service::SaleService, schedule_service::ScheduleService,
    supplier_service::SupplierService, user_service::UserService,
};
use axum::{
    routing::{get, patch, post},
    Router,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub role_service: RoleService,
    pub permission_service: PermissionService,
    pub category_service: CategoryService,
    pub product_service: ProductService,
    pub supplier_service: SupplierService,
    pub customer_service: CustomerService,
    pub sale_service: SaleService,
    pub payment_service: PaymentService,
    pub attendance_service: AttendanceService,
    pub schedule_service: ScheduleService,
    pub notification_service: NotificationPreferenceService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self {
            auth_service: AuthService::new(pool.clone()),
            user_service: UserService::new(pool.clone()),
            role_service: RoleService::new(pool.clone()),
            permission_service: PermissionService::new(pool.clone()),
            category_service: CategoryService::new(pool.clone()),
            product_service: ProductService::new(pool.clone()),
            supplier_service: SupplierService::new(pool.clone()),
            customer_service: CustomerService::new(pool.clone()),
            sale_service: SaleService::new(pool.clone()),
            payment_service: PaymentService::new(pool.clone()),
            attendance_service: AttendanceService::new(pool.clone()),
            schedule_service: ScheduleService::new(pool.clone()),
            notification_service: NotificationPreferenceService::new(pool.clone()),
            pool,
        }
    }
}

/// Full API router, shared by the binary and the integration tests.
pub fn api_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login));

    let protected = Router::new()
        .route("/api/users", get(routes::users::list_users))
        .route(
            "/api/users/:id",
            get(routes::users::get_user)
                .patch(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        .route("/api/users/:id/password", patch(routes::users::change_password))
        .route("/api/users/:id/lock", post(routes::users::lock_user))
        .route("/api/users/:id/unlock", post(routes::users::unlock_user))
        .route(
            "/api/users/:id/roles/:role_id",
            post(routes::users::assign_role).delete(routes::users::remove_role),
        )
        .route(
            "/api/roles",
            get(routes::roles::list_roles).post(routes::roles::create_role),
        )
        .route(
            "/api/roles/:id",
            get(routes::roles::get_role)
                .patch(routes::roles::update_role)
                .delete(routes::roles::delete_role),
        )
        .route(
            "/api/roles/:id/permissions/:permission_id",
            post(routes::roles::assign_permission).delete(routes::roles::remove_permission),
        )
        .route(
            "/api/permissions",
            get(routes::permissions::list_permissions).post(routes::permissions::create_permission),
        )
        .route(
            "/api/permissions/:id",
            get(routes::permissions::get_permission)
                .patch(routes::permissions::update_permission)
                .delete(routes::permissions::delete_permission),
        )
        .route(
            "/api/categories",
            get(routes::categories::list_categories).post(routes::categories::create_category),
        )
        .route(
            "/api/categories/delete-many",
            post(routes::categories::delete_categories),
        )
        .route(
            "/api/categories/:id",
            get(routes::categories::get_category)
                .patch(routes::categories::update_category)
                .delete(routes::categories::delete_category),
        )
        .route(
            "/api/products",
            get(routes::products::list_products).post(routes::products::create_product),
        )
        .route(
            "/api/products/delete-many",
            post(routes::products::delete_products),
        )
        .route(
            "/api/products/:id",
            get(routes::products::get_product)
                .patch(routes::products::update_product)
                .delete(routes::products::delete_product),
        )
        .route(
            "/api/suppliers",
            get(routes::suppliers::list_suppliers).post(routes::suppliers::create_supplier),
        )
        .route(
            "/api/suppliers/delete-many",
            post(routes::suppliers::delete_suppliers),
        )
        .route(
            "/api/suppliers/:id",
            get(routes::suppliers::get_supplier)
                .patch(routes::suppliers::update_supplier)
                .delete(routes::suppliers::delete_supplier),
        )
        .route(
            "/api/customers",
            get(routes::customers::list_customers).post(routes::customers::create_customer),
        )
        .route(
            "/api/customers/delete-many",
            post(routes::customers::delete_customers),
        )
        .route(
            "/api/customers/:id",
            get(routes::customers::get_customer)
                .patch(routes::customers::update_customer)
                .delete(routes::customers::delete_customer),
        )
        .route(
            "/api/sales",
            get(routes::sales::list_sales).post(routes::sales::create_sale),
        )
        .route(
            "/api/sales/:id",
            get(routes::sales::get_sale).delete(routes::sales::delete_sale),
        )
        .route(
            "/api/payments",
            get(routes::payments::list_payments).post(routes::payments::create_payment),
        )
        .route(
            "/api/payments/delete-many",
            post(routes::payments::delete_payments),
        )
        .route(
            "/api/payments/:id",
            get(routes::payments::get_payment)
                .patch(routes::payments::update_payment)
                .delete(routes::payments::delete_payment),
        )
        .route("/api/attendance", get(routes::attendance::list_attendance))
        .route(
            "/api/attendance/clock-in",
            post(routes::attendance::clock_in),
        )
        .route(
            "/api/attendance/:id/clock-out",
            post(routes::attendance::clock_out),
        )
        .route(
            "/api/attendance/:id",
            get(routes::attendance::get_attendance)
                .patch(routes::attendance::update_attendance)
                .delete(routes::attendance::delete_attendance),
        )
        .route(
            "/api/schedules",
            get(routes::schedules::list_schedules).post(routes::schedules::create_schedule),
        )
        .route(
            "/api/schedules/:id",
            get(routes::schedules::get_schedule)
                .patch(routes::schedules::update_schedule)
                .delete(routes::schedules::delete_schedule),
        )
        .route(
            "/api/schedules/users/:user_id",
            get(routes::schedules::list_user_schedules),
        )
        .route(
            "/api/schedules/users/:user_id/generate-week",
            post(routes::schedules::generate_weekly_schedule),
        )
        .route(
            "/api/schedules/users/:user_id/copy-previous-week",
            post(routes::schedules::copy_previous_week),
        )
        .route(
            "/api/notification-preferences",
            get(routes::notification_preferences::list_preferences)
                .post(routes::notification_preferences::create_preference),
        )
        .route(
            "/api/notification-preferences/delete-many",
            post(routes::notification_preferences::delete_preferences),
        )
        .route(
            "/api/notification-preferences/users/:user_id",
            get(routes::notification_preferences::list_user_preferences),
        )
        .route(
            "/api/notification-preferences/:id",
            get(routes::notification_preferences::get_preference)
                .patch(routes::notification_preferences::update_preference)
                .delete(routes::notification_preferences::delete_preference),
        )
        // Layer order: authenticate (outermost) decodes the bearer token,
        // require_auth then rejects anything still anonymous.
        .route_layer(axum::middleware::from_fn(middleware::auth::require_auth))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    public.merge(protected).with_state(state)
}
