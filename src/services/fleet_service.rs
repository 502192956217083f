use crate::models::fleet::{
    Airplane, Airport, Company, NewAirplaneRequest, NewAirportRequest, NewCompanyRequest,
};
use crate::utils::error::{is_foreign_key_violation, AppError, AppResult};
use sqlx::SqlitePool;

/// Companies, airplanes and routes.
#[derive(Clone)]
pub struct FleetService {
    pool: SqlitePool,
}

impl FleetService {
    pub fn new(pool: SqlitePool) -> Self {
        FleetService { pool }
    }

    pub async fn list_companies(&self) -> AppResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>("SELECT id, name FROM company ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }

    pub async fn add_company(&self, request: NewCompanyRequest) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO company (name) VALUES (?)")
            .bind(request.name.trim())
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn delete_company(&self, company_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM company WHERE id = ?")
            .bind(company_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict("Company still has airplanes".into())
                } else {
                    AppError::from(e)
                }
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Company not found".into()));
        }
        Ok(())
    }

    pub async fn list_airplanes(&self) -> AppResult<Vec<Airplane>> {
        let airplanes =
            sqlx::query_as::<_, Airplane>("SELECT id, name, company_id FROM airplane ORDER BY id")
                .fetch_all(&self.pool)
                .await?;
        Ok(airplanes)
    }

    pub async fn add_airplane(&self, request: NewAirplaneRequest) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO airplane (name, company_id) VALUES (?, ?)")
            .bind(request.name.trim())
            .bind(request.company_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Unprocessable("Unknown company".into())
                } else {
                    AppError::from(e)
                }
            })?;
        Ok(result.last_insert_rowid())
    }

    pub async fn list_airports(&self) -> AppResult<Vec<Airport>> {
        let airports = sqlx::query_as::<_, Airport>(
            "SELECT id, start_code, finish_code FROM airport ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(airports)
    }

    pub async fn add_airport(&self, request: NewAirportRequest) -> AppResult<i64> {
        let start = request.start_code.trim();
        let finish = request.finish_code.trim();
        if start.is_empty() || finish.is_empty() {
            return Err(AppError::ValidationError("Both airport codes are required".into()));
        }
        if start.to_lowercase() == finish.to_lowercase() {
            return Err(AppError::ValidationError(
                "Departure and arrival airports must differ".into(),
            ));
        }

        let result = sqlx::query("INSERT INTO airport (start_code, finish_code) VALUES (?, ?)")
            .bind(start)
            .bind(finish)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }
}
