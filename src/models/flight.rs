use chrono::NaiveTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Departure times are stored and exchanged as `HH:MM`.
pub const DEPARTURE_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Flight {
    pub id: i64,
    pub airplane_id: i64,
    pub airport_id: i64,
    pub flight_number: i32,
    pub departure_time: String,
}

// Flight joined with its airplane, route and company
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct FlightDetail {
    pub id: i64,
    pub flight_number: i32,
    pub airplane_name: String,
    pub route: String,
    pub departure_time: String,
    pub company_name: String,
    pub airplane_id: i64,
    pub airport_id: i64,
}

#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct FlightSearchResult {
    pub id: i64,
    pub flight_number: i32,
    pub start_code: String,
    pub finish_code: String,
    pub departure_time: String,
    pub company_name: String,
}

#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct FlightSearchQuery {
    pub start_code: Option<String>,
    pub finish_code: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct NewFlightRequest {
    pub airplane_id: i64,
    pub airport_id: i64,
    #[validate(range(min = 1))]
    pub flight_number: i32,
    #[validate(custom(function = "valid_departure_time"))]
    pub departure_time: String,
}

/// Partial update; absent fields keep their value.
#[derive(Debug, Default, Deserialize, JsonSchema, Validate)]
pub struct UpdateFlightRequest {
    pub airplane_id: Option<i64>,
    pub airport_id: Option<i64>,
    #[validate(range(min = 1))]
    pub flight_number: Option<i32>,
    #[validate(custom(function = "valid_departure_time"))]
    pub departure_time: Option<String>,
}

impl UpdateFlightRequest {
    pub fn is_empty(&self) -> bool {
        self.airplane_id.is_none()
            && self.airport_id.is_none()
            && self.flight_number.is_none()
            && self.departure_time.is_none()
    }
}

pub fn parse_departure_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), DEPARTURE_TIME_FORMAT).ok()
}

pub fn valid_departure_time(value: &str) -> Result<(), ValidationError> {
    match parse_departure_time(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("departure_time_format")),
    }
}

/// Normalize `9:05` to `09:05`.
pub fn normalize_departure_time(value: &str) -> Option<String> {
    parse_departure_time(value).map(|t| t.format(DEPARTURE_TIME_FORMAT).to_string())
}
