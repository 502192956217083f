use crate::models::fleet::CreatedResponse;
use crate::models::flight::{
    Flight, FlightDetail, FlightSearchQuery, FlightSearchResult, NewFlightRequest,
    UpdateFlightRequest,
};
use crate::models::seat::{
    AvailableSeat, Seat, SeatCheckResponse, SeatMapEntry, SeatStatisticsResponse,
};
use crate::models::user::Role;
use crate::services::booking_service::BookingService;
use crate::services::flight_service::FlightService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::{json, Json, Value};
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

/// List all flights with airplane, route and company
#[openapi(tag = "Flights")]
#[get("/flights")]
pub async fn list_flights(
    _auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Vec<FlightDetail>>, AppError> {
    Ok(Json(flight_service.list_flights().await?))
}

/// Search flights by route codes
#[openapi(tag = "Flights")]
#[get("/flights/search?<start_code>&<finish_code>")]
pub async fn search_flights(
    start_code: Option<String>,
    finish_code: Option<String>,
    _auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Vec<FlightSearchResult>>, AppError> {
    let query = FlightSearchQuery {
        start_code,
        finish_code,
    };
    Ok(Json(flight_service.search_flights(query).await?))
}

#[openapi(tag = "Flights")]
#[get("/flights/<flight_id>")]
pub async fn get_flight(
    flight_id: i64,
    _auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Flight>, AppError> {
    Ok(Json(flight_service.get_flight(flight_id).await?))
}

/// Create a flight together with its seat grid
#[openapi(tag = "Flights")]
#[post("/flights", format = "json", data = "<request>")]
pub async fn add_flight(
    request: Json<NewFlightRequest>,
    auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<CreatedResponse>, AppError> {
    auth.require(Role::Senior)?;
    request.validate()?;
    let id = flight_service.add_flight(request.into_inner()).await?;
    Ok(Json(CreatedResponse { id }))
}

#[openapi(tag = "Flights")]
#[patch("/flights/<flight_id>", format = "json", data = "<request>")]
pub async fn update_flight(
    flight_id: i64,
    request: Json<UpdateFlightRequest>,
    auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Value>, AppError> {
    auth.require(Role::Senior)?;
    request.validate()?;
    flight_service
        .update_flight(flight_id, request.into_inner())
        .await?;
    Ok(Json(json!({ "status": "success" })))
}

/// Delete a flight with its seats and bookings
#[openapi(tag = "Flights")]
#[delete("/flights/<flight_id>")]
pub async fn delete_flight(
    flight_id: i64,
    auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Value>, AppError> {
    auth.require(Role::Senior)?;
    flight_service.delete_flight(flight_id).await?;
    Ok(Json(json!({ "status": "success" })))
}

#[openapi(tag = "Seats")]
#[get("/flights/<flight_id>/seats")]
pub async fn get_seats(
    flight_id: i64,
    _auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Vec<Seat>>, AppError> {
    Ok(Json(flight_service.get_all_seats(flight_id).await?))
}

#[openapi(tag = "Seats")]
#[get("/flights/<flight_id>/seats/available")]
pub async fn get_available_seats(
    flight_id: i64,
    _auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Vec<AvailableSeat>>, AppError> {
    Ok(Json(flight_service.get_available_seats(flight_id).await?))
}

#[openapi(tag = "Seats")]
#[get("/flights/<flight_id>/seats/label/<label>")]
pub async fn get_seat_by_label(
    flight_id: i64,
    label: String,
    _auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Seat>, AppError> {
    let seat = flight_service
        .get_seat_by_label(flight_id, &label)
        .await?
        .ok_or_else(|| AppError::NotFound("Seat not found".into()))?;
    Ok(Json(seat))
}

/// Validate a seat and tell whether it can be booked
#[openapi(tag = "Seats")]
#[get("/flights/<flight_id>/seats/check?<seat_class>&<row_number>&<seat_letter>")]
pub async fn check_seat(
    flight_id: i64,
    seat_class: String,
    row_number: i32,
    seat_letter: String,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<SeatCheckResponse>, AppError> {
    let response = booking_service
        .check_seat(flight_id, &seat_class, row_number, &seat_letter)
        .await?;
    Ok(Json(response))
}

#[openapi(tag = "Seats")]
#[get("/flights/<flight_id>/seat-map")]
pub async fn get_seat_map(
    flight_id: i64,
    _auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<Vec<SeatMapEntry>>, AppError> {
    Ok(Json(flight_service.get_seat_map(flight_id).await?))
}

/// Occupancy per seat class
#[openapi(tag = "Seats")]
#[get("/flights/<flight_id>/statistics")]
pub async fn get_seat_statistics(
    flight_id: i64,
    _auth: AuthenticatedUser,
    flight_service: &State<FlightService>,
) -> Result<Json<SeatStatisticsResponse>, AppError> {
    Ok(Json(flight_service.get_seat_statistics(flight_id).await?))
}
