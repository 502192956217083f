use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct NewCompanyRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Airplane {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct NewAirplaneRequest {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub company_id: i64,
}

/// A route between two airport codes.
#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Airport {
    pub id: i64,
    pub start_code: String,
    pub finish_code: String,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct NewAirportRequest {
    #[validate(custom(function = "not_blank"))]
    pub start_code: String,
    #[validate(custom(function = "not_blank"))]
    pub finish_code: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
