use crate::models::fleet::not_blank;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Passenger {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub passport_number: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct NewPassengerRequest {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "not_blank"))]
    pub phone: String,
    #[validate(custom(function = "not_blank"))]
    pub passport_number: String,
}
