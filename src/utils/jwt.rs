use crate::config::AppConfig;
use crate::models::user::Role;
use crate::services::user_service::UserService;
use crate::utils::error::{AppError, AppResult};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use serde::{Deserialize, Serialize};
use rocket_okapi::request::OpenApiFromRequest;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,  // user_id
    pub role: Role,
    pub exp: usize,
}

#[derive(Debug, Clone, Copy, OpenApiFromRequest)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthenticatedUser {
    // Reject callers below the given role
    pub fn require(&self, role: Role) -> AppResult<()> {
        if self.role >= role {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("{} role required", role)))
        }
    }
}

pub fn generate_token(user_id: i64, role: Role, secret: &str, ttl_hours: i64) -> AppResult<String> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::AuthError("Invalid token lifetime".into()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        role,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::AuthError(e.to_string()))
}

pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::AuthError("Invalid token".into()))
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthenticatedUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = match request.headers().get_one("Authorization") {
            Some(token) if token.starts_with("Bearer ") => token[7..].to_string(),
            _ => return Outcome::Error((Status::Unauthorized, ())),
        };

        let (config, user_service) = match (
            request.rocket().state::<AppConfig>(),
            request.rocket().state::<UserService>(),
        ) {
            (Some(config), Some(user_service)) => (config, user_service),
            _ => return Outcome::Error((Status::InternalServerError, ())),
        };

        let claims = match verify_token(&token, &config.jwt_secret) {
            Ok(claims) => claims,
            Err(_) => return Outcome::Error((Status::Unauthorized, ())),
        };

        // The stored role wins over the one signed into the token
        match user_service.get_user(claims.sub).await {
            Ok(user) => Outcome::Success(AuthenticatedUser {
                user_id: user.id,
                role: user.role,
            }),
            Err(AppError::NotFound(_)) => Outcome::Error((Status::Unauthorized, ())),
            Err(e) => {
                log::error!("Failed to load user {} for request: {}", claims.sub, e);
                Outcome::Error((Status::InternalServerError, ()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_user_and_role() {
        let token = generate_token(42, Role::Senior, "test-secret", 1).unwrap();
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Senior);
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn require_compares_roles() {
        let senior = AuthenticatedUser { user_id: 1, role: Role::Senior };
        assert!(senior.require(Role::Employee).is_ok());
        assert!(senior.require(Role::Senior).is_ok());
        assert!(matches!(senior.require(Role::Admin), Err(AppError::Forbidden(_))));
    }
}
