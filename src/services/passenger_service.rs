use crate::models::passenger::{NewPassengerRequest, Passenger};
use crate::utils::error::{is_foreign_key_violation, AppError, AppResult};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct PassengerService {
    pool: SqlitePool,
}

impl PassengerService {
    pub fn new(pool: SqlitePool) -> Self {
        PassengerService { pool }
    }

    pub async fn list_passengers(&self) -> AppResult<Vec<Passenger>> {
        let passengers = sqlx::query_as::<_, Passenger>(
            "SELECT id, first_name, last_name, phone, passport_number FROM passenger ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(passengers)
    }

    pub async fn get_passenger(&self, passenger_id: i64) -> AppResult<Passenger> {
        sqlx::query_as::<_, Passenger>(
            "SELECT id, first_name, last_name, phone, passport_number FROM passenger WHERE id = ?",
        )
        .bind(passenger_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Passenger not found".into()))
    }

    pub async fn add_passenger(&self, request: NewPassengerRequest) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO passenger (first_name, last_name, phone, passport_number)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(request.first_name.trim())
        .bind(request.last_name.trim())
        .bind(request.phone.trim())
        .bind(request.passport_number.trim())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn delete_passenger(&self, passenger_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM passenger WHERE id = ?")
            .bind(passenger_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict("Passenger has bookings".into())
                } else {
                    AppError::from(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Passenger not found".into()));
        }
        Ok(())
    }
}
