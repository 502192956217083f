use crate::models::fleet::CreatedResponse;
use crate::models::passenger::{NewPassengerRequest, Passenger};
use crate::services::passenger_service::PassengerService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

#[openapi(tag = "Passengers")]
#[get("/passengers")]
pub async fn list_passengers(
    _auth: AuthenticatedUser,
    passenger_service: &State<PassengerService>,
) -> Result<Json<Vec<Passenger>>, AppError> {
    Ok(Json(passenger_service.list_passengers().await?))
}

#[openapi(tag = "Passengers")]
#[get("/passengers/<passenger_id>")]
pub async fn get_passenger(
    passenger_id: i64,
    _auth: AuthenticatedUser,
    passenger_service: &State<PassengerService>,
) -> Result<Json<Passenger>, AppError> {
    Ok(Json(passenger_service.get_passenger(passenger_id).await?))
}

#[openapi(tag = "Passengers")]
#[post("/passengers", format = "json", data = "<request>")]
pub async fn add_passenger(
    request: Json<NewPassengerRequest>,
    _auth: AuthenticatedUser,
    passenger_service: &State<PassengerService>,
) -> Result<Json<CreatedResponse>, AppError> {
    request.validate()?;
    let id = passenger_service.add_passenger(request.into_inner()).await?;
    Ok(Json(CreatedResponse { id }))
}

#[openapi(tag = "Passengers")]
#[delete("/passengers/<passenger_id>")]
pub async fn delete_passenger(
    passenger_id: i64,
    _auth: AuthenticatedUser,
    passenger_service: &State<PassengerService>,
) -> Result<Json<Value>, AppError> {
    passenger_service.delete_passenger(passenger_id).await?;
    Ok(Json(json!({ "status": "success" })))
}
