use chrono::NaiveDateTime;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub flight_id: i64,
    pub seat_id: i64,
    pub passenger_id: i64,
    pub booking_time: NaiveDateTime,
    /// true = confirmed, false = cancelled
    pub status: bool,
}

// Booking row as listed for staff, newest first
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct BookingDetail {
    pub id: i64,
    pub flight_number: i32,
    pub passenger: String,
    pub seat: String,
    pub booking_time: NaiveDateTime,
    pub status: bool,
    pub flight_id: i64,
    pub seat_id: i64,
    pub passenger_id: i64,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BookingRequest {
    pub flight_id: i64,
    pub seat_id: i64,
    pub passenger_id: i64,
    pub status: Option<bool>,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct BookingResponse {
    pub booking_id: i64,
    pub flight_id: i64,
    pub seat_id: i64,
    pub booking_status: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct StatusChangeResponse {
    pub booking_id: i64,
    pub status: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CancelAllResponse {
    pub flight_id: i64,
    pub cancelled: u64,
}
