use crate::models::report::{ConsoleOutcome, ConsoleRequest};
use crate::models::user::Role;
use crate::services::console_service::ConsoleService;
use crate::utils::csv_export::{export_file_name, to_csv, CsvFile, CONSOLE_DELIMITER};
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

/// Execute a raw SQL statement (administrators only)
#[openapi(tag = "Console")]
#[post("/console", format = "json", data = "<request>")]
pub async fn execute(
    request: Json<ConsoleRequest>,
    auth: AuthenticatedUser,
    console_service: &State<ConsoleService>,
) -> Result<Json<ConsoleOutcome>, AppError> {
    auth.require(Role::Admin)?;
    Ok(Json(console_service.execute(&request.sql).await?))
}

#[openapi(tag = "Console")]
#[get("/console/history")]
pub async fn history(
    auth: AuthenticatedUser,
    console_service: &State<ConsoleService>,
) -> Result<Json<Vec<String>>, AppError> {
    auth.require(Role::Admin)?;
    Ok(Json(console_service.history().await))
}

// Run a read-only query and download its rows as comma-separated CSV
#[post("/console/csv", format = "json", data = "<request>")]
pub async fn export_csv(
    request: Json<ConsoleRequest>,
    auth: AuthenticatedUser,
    console_service: &State<ConsoleService>,
) -> Result<CsvFile, AppError> {
    auth.require(Role::Admin)?;
    let table = console_service.query_rows(&request.sql).await?;
    if table.rows.is_empty() {
        return Err(AppError::BadRequest("No data to export".into()));
    }
    let bytes = to_csv(&table, CONSOLE_DELIMITER)?;
    let file_name = export_file_name("sql_export", chrono::Local::now().naive_local());
    Ok(CsvFile::new(bytes, &file_name))
}
