use crate::models::booking::{
    Booking, BookingDetail, BookingRequest, BookingResponse, CancelAllResponse,
    StatusChangeResponse,
};
use crate::models::user::Role;
use crate::services::booking_service::BookingService;
use crate::utils::error::AppError;
use crate::utils::jwt::AuthenticatedUser;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

#[openapi(tag = "Bookings")]
#[get("/bookings")]
pub async fn list_bookings(
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Vec<BookingDetail>>, AppError> {
    Ok(Json(booking_service.list_bookings().await?))
}

#[openapi(tag = "Bookings")]
#[get("/bookings/<booking_id>")]
pub async fn get_booking(
    booking_id: i64,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<Booking>, AppError> {
    Ok(Json(booking_service.get_booking(booking_id).await?))
}

/// Book a seat on a flight for a passenger
#[openapi(tag = "Bookings")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn create_booking(
    request: Json<BookingRequest>,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<BookingResponse>, AppError> {
    let response = booking_service.create_booking(request.into_inner()).await?;
    Ok(Json(response))
}

#[openapi(tag = "Bookings")]
#[post("/bookings/<booking_id>/cancel")]
pub async fn cancel_booking(
    booking_id: i64,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<StatusChangeResponse>, AppError> {
    booking_service.cancel_booking(booking_id).await?;
    Ok(Json(StatusChangeResponse {
        booking_id,
        status: false,
    }))
}

/// Re-activate a cancelled booking
#[openapi(tag = "Bookings")]
#[post("/bookings/<booking_id>/confirm")]
pub async fn confirm_booking(
    booking_id: i64,
    _auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<StatusChangeResponse>, AppError> {
    booking_service.confirm_cancelled_booking(booking_id).await?;
    Ok(Json(StatusChangeResponse {
        booking_id,
        status: true,
    }))
}

/// Cancel every active booking on a flight
#[openapi(tag = "Bookings")]
#[post("/flights/<flight_id>/bookings/cancel")]
pub async fn cancel_all_flight_bookings(
    flight_id: i64,
    auth: AuthenticatedUser,
    booking_service: &State<BookingService>,
) -> Result<Json<CancelAllResponse>, AppError> {
    auth.require(Role::Senior)?;
    let cancelled = booking_service.cancel_all_flight_bookings(flight_id).await?;
    Ok(Json(CancelAllResponse {
        flight_id,
        cancelled,
    }))
}
