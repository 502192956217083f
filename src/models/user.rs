use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use strum_macros::{Display, EnumString};
use validator::Validate;

use crate::models::fleet::not_blank;

/// Staff role, ordered by privilege.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
    Serialize, Deserialize, JsonSchema, sqlx::Type, Display, EnumString,
)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Role {
    Employee,
    Senior,
    Admin,
}

#[derive(Debug, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub nickname: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, JsonSchema, sqlx::FromRow)]
pub struct UserSummary {
    pub id: i64,
    pub nickname: String,
    pub role: Role,
}

#[derive(Debug, Deserialize, JsonSchema, Validate)]
pub struct UserRegistrationRequest {
    #[validate(custom(function = "not_blank"))]
    pub nickname: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UserLoginRequest {
    pub nickname: String,
    pub password: String,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct UserLoginResponse {
    pub token: String,
    pub user_id: i64,
    pub role: Role,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct RoleChangeRequest {
    pub role: Role,
}

#[derive(Debug, Serialize, JsonSchema)]
#[schemars(example = "RegisterResponse::example")]
pub struct RegisterResponse {
    #[schemars(title = "User ID")]
    pub user_id: i64,

    #[schemars(title = "Register Status")]
    pub status: String,
}

impl RegisterResponse {
    pub fn example() -> Self {
        Self {
            user_id: 123,
            status: "success".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_are_ordered_by_privilege() {
        assert!(Role::Employee < Role::Senior);
        assert!(Role::Senior < Role::Admin);
    }

    #[test]
    fn role_names_are_uppercase() {
        assert_eq!(Role::Senior.to_string(), "SENIOR");
        assert_eq!("admin".parse::<Role>().ok(), Some(Role::Admin));
        assert!("OWNER".parse::<Role>().is_err());
    }
}
