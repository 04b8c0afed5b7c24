use crate::error::{Error, Result};
use chrono::NaiveTime;
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub workday_start: NaiveTime,
    pub workday_end: NaiveTime,
    pub late_threshold_minutes: i64,
    pub early_departure_threshold_minutes: i64,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            jwt_expiration_hours: get_env_or("JWT_EXPIRATION_HOURS", 24)?,
            workday_start: get_env_time("WORKDAY_START", "09:00")?,
            workday_end: get_env_time("WORKDAY_END", "17:00")?,
            late_threshold_minutes: get_env_or("LATE_THRESHOLD_MINUTES", 15)?,
            early_departure_threshold_minutes: get_env_or(
                "EARLY_DEPARTURE_THRESHOLD_MINUTES",
                15,
            )?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn get_env_time(name: &str, default: &str) -> Result<NaiveTime> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    NaiveTime::parse_from_str(&raw, "%H:%M")
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
