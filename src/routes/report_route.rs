use crate::models::report::TabularResult;
use crate::services::report_service::{ReportKind, ReportService};
use crate::utils::csv_export::{export_file_name, to_csv, CsvFile, REPORT_DELIMITER};
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

fn parse_kind(kind: &str) -> Result<ReportKind, AppError> {
    kind.parse()
        .map_err(|_| AppError::NotFound(format!("Unknown report '{}'", kind)))
}

/// Run a report: company-flights, passenger-stats, seat-occupancy,
/// seat-class-stats, flight-occupancy, bookings-by-day or popular-routes
#[openapi(tag = "Reports")]
#[get("/reports/<kind>?<limit>")]
pub async fn run_report(
    kind: String,
    limit: Option<i64>,
    _auth: AuthenticatedUser,
    report_service: &State<ReportService>,
) -> Result<Json<TabularResult>, AppError> {
    let kind = parse_kind(&kind)?;
    Ok(Json(report_service.run(kind, limit).await?))
}

// Semicolon-separated export of the same report
#[get("/reports/<kind>/csv?<limit>")]
pub async fn export_report(
    kind: String,
    limit: Option<i64>,
    _auth: AuthenticatedUser,
    report_service: &State<ReportService>,
) -> Result<CsvFile, AppError> {
    let kind = parse_kind(&kind)?;
    let table = report_service.run(kind, limit).await?;
    let bytes = to_csv(&table, REPORT_DELIMITER)?;
    let file_name = export_file_name("report", chrono::Local::now().naive_local());
    Ok(CsvFile::new(bytes, &file_name))
}
