use crate::models::user::{
    RegisterResponse, Role, RoleChangeRequest, UserLoginRequest, UserLoginResponse,
    UserRegistrationRequest, UserSummary,
};
use crate::services::user_service::UserService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

/// Register a new user
#[openapi(tag = "Users")]
#[post("/register", format = "json", data = "<request>")]
pub async fn register(
    request: Json<UserRegistrationRequest>,
    user_service: &State<UserService>,
) -> Result<Json<RegisterResponse>, AppError> {
    request.validate()?;
    let user_id = user_service.register_user(request.into_inner()).await?;
    Ok(Json(RegisterResponse {
        user_id,
        status: "success".to_string(),
    }))
}

/// Login a user
#[openapi(tag = "Users")]
#[post("/login", format = "json", data = "<request>")]
pub async fn login(
    request: Json<UserLoginRequest>,
    user_service: &State<UserService>,
) -> Result<Json<UserLoginResponse>, AppError> {
    let response = user_service.login_user(request.into_inner()).await?;
    Ok(Json(response))
}

#[openapi(tag = "Users")]
#[get("/users")]
pub async fn list_users(
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    auth.require(Role::Admin)?;
    Ok(Json(user_service.list_users().await?))
}

#[openapi(tag = "Users")]
#[put("/users/<user_id>/role", format = "json", data = "<request>")]
pub async fn set_user_role(
    user_id: i64,
    request: Json<RoleChangeRequest>,
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<Value>, AppError> {
    auth.require(Role::Admin)?;
    user_service
        .set_role(auth.user_id, user_id, request.role)
        .await?;
    Ok(Json(json!({ "status": "success" })))
}

#[openapi(tag = "Users")]
#[delete("/users/<user_id>")]
pub async fn delete_user(
    user_id: i64,
    auth: AuthenticatedUser,
    user_service: &State<UserService>,
) -> Result<Json<Value>, AppError> {
    auth.require(Role::Admin)?;
    user_service.delete_user(auth.user_id, user_id).await?;
    Ok(Json(json!({ "status": "success" })))
}
