use crate::models::seat::SeatLayout;
use crate::utils::error::{AppError, AppResult};
use std::env;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub bootstrap_admin_nickname: String,
    pub bootstrap_admin_password: Option<String>,
    pub seat_layout: SeatLayout,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenv::dotenv().ok();

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let token_ttl_hours = match env::var("TOKEN_TTL_HOURS") {
            Ok(value) => value.parse::<i64>().map_err(|_| {
                AppError::ValidationError("TOKEN_TTL_HOURS must be an integer".into())
            })?,
            Err(_) => 24,
        };
        if token_ttl_hours <= 0 {
            return Err(AppError::ValidationError(
                "TOKEN_TTL_HOURS must be positive".into(),
            ));
        }

        Ok(AppConfig {
            database_url,
            jwt_secret,
            token_ttl_hours,
            bootstrap_admin_nickname: env::var("BOOTSTRAP_ADMIN_NICKNAME")
                .unwrap_or_else(|_| "admin".to_string()),
            bootstrap_admin_password: env::var("BOOTSTRAP_ADMIN_PASSWORD")
                .ok()
                .filter(|p| !p.is_empty()),
            seat_layout: SeatLayout::default(),
        })
    }

    /// Configuration for tests and embedded use: in-memory store, fixed secret.
    pub fn in_memory(jwt_secret: &str) -> Self {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: jwt_secret.to_string(),
            token_ttl_hours: 24,
            bootstrap_admin_nickname: "admin".to_string(),
            bootstrap_admin_password: None,
            seat_layout: SeatLayout::default(),
        }
    }
}

fn required(key: &str) -> AppResult<String> {
    env::var(key).map_err(|_| AppError::ValidationError(format!("{} must be set", key)))
}
