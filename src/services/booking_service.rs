use crate::models::booking::{Booking, BookingDetail, BookingRequest, BookingResponse};
use crate::models::seat::{SeatCheckResponse, SeatClass};
use crate::services::flight_service::FlightService;
use crate::utils::error::{is_unique_violation, AppError, AppResult};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct BookingService {
    pool: SqlitePool,
    flight_service: FlightService,
}

impl BookingService {
    pub fn new(pool: SqlitePool, flight_service: FlightService) -> Self {
        BookingService {
            pool,
            flight_service,
        }
    }

    // A seat is free iff no active booking references it on this flight
    pub async fn is_seat_available(&self, seat_id: i64, flight_id: i64) -> AppResult<bool> {
        let active: Option<i64> = sqlx::query_scalar(
            "SELECT 1 FROM booking WHERE seat_id = ? AND flight_id = ? AND status = 1",
        )
        .bind(seat_id)
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(active.is_none())
    }

    /// Validate a (class, row, letter) triple, resolve it to a seat and report availability.
    pub async fn check_seat(
        &self,
        flight_id: i64,
        seat_class: &str,
        row_number: i32,
        seat_letter: &str,
    ) -> AppResult<SeatCheckResponse> {
        if !self
            .flight_service
            .seat_layout()
            .validate_seat(seat_class, row_number, seat_letter)
        {
            return Err(AppError::ValidationError(format!(
                "Invalid seat {}{} in class {}",
                row_number, seat_letter, seat_class
            )));
        }
        let seat_class: SeatClass = seat_class
            .trim()
            .parse()
            .map_err(|_| AppError::ValidationError("Unknown seat class".into()))?;

        let seat = self
            .flight_service
            .find_seat_by_details(flight_id, seat_class, row_number, seat_letter)
            .await?
            .ok_or_else(|| AppError::NotFound("Seat not found on this flight".into()))?;

        let available = self.is_seat_available(seat.id, flight_id).await?;

        Ok(SeatCheckResponse {
            seat_id: seat.id,
            seat_label: seat.seat_label,
            available,
        })
    }

    /// Book a seat. The insert is a single statement, so the active-seat
    /// unique index is what decides between concurrent writers for one seat.
    pub async fn create_booking(&self, request: BookingRequest) -> AppResult<BookingResponse> {
        let status = request.status.unwrap_or(true);

        let seat_flight: Option<i64> = sqlx::query_scalar("SELECT flight_id FROM place WHERE id = ?")
            .bind(request.seat_id)
            .fetch_optional(&self.pool)
            .await?;
        match seat_flight {
            Some(flight_id) if flight_id == request.flight_id => {}
            Some(_) => {
                return Err(AppError::ValidationError(
                    "Seat does not belong to this flight".into(),
                ))
            }
            None => return Err(AppError::NotFound("Seat not found".into())),
        }

        if status && !self.is_seat_available(request.seat_id, request.flight_id).await? {
            return Err(AppError::Conflict("Seat is already booked".into()));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO booking (flight_id, seat_id, passenger_id, booking_time, status)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(request.flight_id)
        .bind(request.seat_id)
        .bind(request.passenger_id)
        .bind(chrono::Utc::now().naive_utc())
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(booking_write_error)?;

        let booking_id = result.last_insert_rowid();

        log::info!(
            "Booked seat {} on flight {} for passenger {} (booking {})",
            request.seat_id,
            request.flight_id,
            request.passenger_id,
            booking_id
        );

        Ok(BookingResponse {
            booking_id,
            flight_id: request.flight_id,
            seat_id: request.seat_id,
            booking_status: if status { "Confirmed" } else { "Cancelled" }.to_string(),
        })
    }

    pub async fn get_booking(&self, booking_id: i64) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, flight_id, seat_id, passenger_id, booking_time, status
            FROM booking WHERE id = ?
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))
    }

    pub async fn list_bookings(&self) -> AppResult<Vec<BookingDetail>> {
        let bookings = sqlx::query_as::<_, BookingDetail>(
            r#"
            SELECT b.id,
                f.flight_number,
                p.first_name || ' ' || p.last_name AS passenger,
                pl.seat_class || pl.row_number || pl.seat_letter AS seat,
                b.booking_time,
                b.status,
                b.flight_id, b.seat_id, b.passenger_id
            FROM booking b
            JOIN flight f ON b.flight_id = f.id
            JOIN passenger p ON b.passenger_id = p.id
            JOIN place pl ON b.seat_id = pl.id
            ORDER BY b.booking_time DESC, b.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    /// Mark one booking cancelled. Cancelling twice is a no-op.
    pub async fn cancel_booking(&self, booking_id: i64) -> AppResult<()> {
        let result = sqlx::query("UPDATE booking SET status = 0 WHERE id = ?")
            .bind(booking_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Booking not found".into()));
        }

        log::info!("Cancelled booking {}", booking_id);
        Ok(())
    }

    /// Cancel every active booking of a flight, returning how many changed.
    pub async fn cancel_all_flight_bookings(&self, flight_id: i64) -> AppResult<u64> {
        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM flight WHERE id = ?")
            .bind(flight_id)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_none() {
            return Err(AppError::NotFound("Flight not found".into()));
        }

        let result = sqlx::query("UPDATE booking SET status = 0 WHERE flight_id = ? AND status = 1")
            .bind(flight_id)
            .execute(&self.pool)
            .await?;

        log::info!(
            "Cancelled {} bookings on flight {}",
            result.rows_affected(),
            flight_id
        );
        Ok(result.rows_affected())
    }

    /// Re-activate a cancelled booking, unless its seat was booked again meanwhile.
    pub async fn confirm_cancelled_booking(&self, booking_id: i64) -> AppResult<()> {
        let booking = self.get_booking(booking_id).await?;
        if booking.status {
            return Ok(());
        }

        if !self.is_seat_available(booking.seat_id, booking.flight_id).await? {
            return Err(AppError::Conflict(
                "Seat has been booked again since the cancellation".into(),
            ));
        }

        sqlx::query("UPDATE booking SET status = 1 WHERE id = ? AND status = 0")
            .bind(booking_id)
            .execute(&self.pool)
            .await
            .map_err(booking_write_error)?;

        log::info!("Confirmed booking {}", booking_id);
        Ok(())
    }
}

// Lost seat races surface as conflicts; everything else is a generic failure
fn booking_write_error(err: sqlx::Error) -> AppError {
    if is_unique_violation(&err) {
        return AppError::Conflict("Seat is already booked".into());
    }
    log::error!("Booking write failed: {}", err);
    AppError::Unprocessable("Booking failed".into())
}
