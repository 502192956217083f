use crate::models::fleet::{
    Airplane, Airport, Company, CreatedResponse, NewAirplaneRequest, NewAirportRequest,
    NewCompanyRequest,
};
use crate::models::user::Role;
use crate::services::fleet_service::FleetService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

#[openapi(tag = "Fleet")]
#[get("/companies")]
pub async fn list_companies(
    _auth: AuthenticatedUser,
    fleet_service: &State<FleetService>,
) -> Result<Json<Vec<Company>>, AppError> {
    Ok(Json(fleet_service.list_companies().await?))
}

#[openapi(tag = "Fleet")]
#[post("/companies", format = "json", data = "<request>")]
pub async fn add_company(
    request: Json<NewCompanyRequest>,
    auth: AuthenticatedUser,
    fleet_service: &State<FleetService>,
) -> Result<Json<CreatedResponse>, AppError> {
    auth.require(Role::Senior)?;
    request.validate()?;
    let id = fleet_service.add_company(request.into_inner()).await?;
    Ok(Json(CreatedResponse { id }))
}

#[openapi(tag = "Fleet")]
#[delete("/companies/<company_id>")]
pub async fn delete_company(
    company_id: i64,
    auth: AuthenticatedUser,
    fleet_service: &State<FleetService>,
) -> Result<Json<Value>, AppError> {
    auth.require(Role::Senior)?;
    fleet_service.delete_company(company_id).await?;
    Ok(Json(json!({ "status": "success" })))
}

#[openapi(tag = "Fleet")]
#[get("/airplanes")]
pub async fn list_airplanes(
    _auth: AuthenticatedUser,
    fleet_service: &State<FleetService>,
) -> Result<Json<Vec<Airplane>>, AppError> {
    Ok(Json(fleet_service.list_airplanes().await?))
}

#[openapi(tag = "Fleet")]
#[post("/airplanes", format = "json", data = "<request>")]
pub async fn add_airplane(
    request: Json<NewAirplaneRequest>,
    auth: AuthenticatedUser,
    fleet_service: &State<FleetService>,
) -> Result<Json<CreatedResponse>, AppError> {
    auth.require(Role::Senior)?;
    request.validate()?;
    let id = fleet_service.add_airplane(request.into_inner()).await?;
    Ok(Json(CreatedResponse { id }))
}

/// Routes are start/finish airport code pairs
#[openapi(tag = "Fleet")]
#[get("/airports")]
pub async fn list_airports(
    _auth: AuthenticatedUser,
    fleet_service: &State<FleetService>,
) -> Result<Json<Vec<Airport>>, AppError> {
    Ok(Json(fleet_service.list_airports().await?))
}

#[openapi(tag = "Fleet")]
#[post("/airports", format = "json", data = "<request>")]
pub async fn add_airport(
    request: Json<NewAirportRequest>,
    auth: AuthenticatedUser,
    fleet_service: &State<FleetService>,
) -> Result<Json<CreatedResponse>, AppError> {
    auth.require(Role::Senior)?;
    request.validate()?;
    let id = fleet_service.add_airport(request.into_inner()).await?;
    Ok(Json(CreatedResponse { id }))
}
