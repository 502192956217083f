use crate::models::user::{
    Role, User, UserLoginRequest, UserLoginResponse, UserRegistrationRequest, UserSummary,
};
use crate::utils::error::{is_unique_violation, AppError, AppResult};
use crate::utils::jwt;
use crate::utils::password::{hash_password, verify_password};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct UserService {
    pool: SqlitePool,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl UserService {
    pub fn new(pool: SqlitePool, jwt_secret: String, token_ttl_hours: i64) -> Self {
        UserService {
            pool,
            jwt_secret,
            token_ttl_hours,
        }
    }

    pub async fn user_exists(&self, nickname: &str) -> AppResult<bool> {
        let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE nickname = ?")
            .bind(nickname)
            .fetch_optional(&self.pool)
            .await?;
        Ok(existing.is_some())
    }

    // Register a new user; everyone starts as an employee
    pub async fn register_user(&self, request: UserRegistrationRequest) -> AppResult<i64> {
        self.insert_user(request.nickname.trim(), &request.password, Role::Employee)
            .await
    }

    async fn insert_user(&self, nickname: &str, password: &str, role: Role) -> AppResult<i64> {
        if self.user_exists(nickname).await? {
            return Err(AppError::Conflict("Nickname already exists".into()));
        }

        let result = sqlx::query("INSERT INTO users (nickname, password_hash, role) VALUES (?, ?, ?)")
            .bind(nickname)
            .bind(hash_password(password))
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict("Nickname already exists".into())
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(result.last_insert_rowid())
    }

    /// Create the first administrator when no user exists yet.
    /// Returns the new user's id, or `None` if users were already present.
    pub async fn ensure_admin(&self, nickname: &str, password: &str) -> AppResult<Option<i64>> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(None);
        }

        let user_id = self.insert_user(nickname, password, Role::Admin).await?;
        log::info!("Created bootstrap administrator '{}'", nickname);
        Ok(Some(user_id))
    }

    // Login user
    pub async fn login_user(&self, request: UserLoginRequest) -> AppResult<UserLoginResponse> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, nickname, password_hash, role FROM users WHERE nickname = ?",
        )
        .bind(request.nickname.trim())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::AuthError("Invalid credentials".into()))?;

        if !verify_password(&request.password, &user.password_hash) {
            return Err(AppError::AuthError("Invalid credentials".into()));
        }

        let token = jwt::generate_token(user.id, user.role, &self.jwt_secret, self.token_ttl_hours)?;

        Ok(UserLoginResponse {
            token,
            user_id: user.id,
            role: user.role,
        })
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>("SELECT id, nickname, role FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn get_user(&self, user_id: i64) -> AppResult<UserSummary> {
        sqlx::query_as::<_, UserSummary>("SELECT id, nickname, role FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Change a user's role on behalf of `actor_id`.
    pub async fn set_role(&self, actor_id: i64, user_id: i64, role: Role) -> AppResult<()> {
        let user = self.get_user(user_id).await?;

        if user.role == role {
            return Err(AppError::BadRequest(format!("User already has role {}", role)));
        }
        if actor_id == user_id {
            return Err(AppError::BadRequest("You cannot change your own role".into()));
        }
        if user.role == Role::Admin {
            let other_admins: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = ? AND id != ?")
                    .bind(Role::Admin)
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await?;
            if other_admins == 0 {
                return Err(AppError::BadRequest("The last administrator cannot be demoted".into()));
            }
        }

        sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        log::info!(
            "User {} changed role of '{}' from {} to {}",
            actor_id,
            user.nickname,
            user.role,
            role
        );
        Ok(())
    }

    pub async fn delete_user(&self, actor_id: i64, user_id: i64) -> AppResult<()> {
        if actor_id == user_id {
            return Err(AppError::BadRequest("You cannot delete yourself".into()));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }
        log::info!("User {} deleted user {}", actor_id, user_id);
        Ok(())
    }
}
