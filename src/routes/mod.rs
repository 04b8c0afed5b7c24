pub mod attendance;
pub mod auth;
pub mod categories;
pub mod customers;
pub mod health;
pub mod notification_preferences;
pub mod payments;
pub mod permissions;
pub mod products;
pub mod roles;
pub mod sales;
pub mod schedules;
pub mod suppliers;
pub mod users;
