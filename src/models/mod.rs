pub mod attendance;
pub mod audit_log;
pub mod category;
pub mod customer;
pub mod notification_preference;
pub mod payment;
pub mod permission;
pub mod product;
pub mod role;
pub mod sale;
pub mod schedule;
pub mod supplier;
pub mod user;
