use crate::models::flight::{
    normalize_departure_time, Flight, FlightDetail, FlightSearchQuery, FlightSearchResult,
    NewFlightRequest, UpdateFlightRequest,
};
use crate::models::seat::{
    parse_seat_label, AvailableSeat, ClassStatistics, Seat, SeatClass, SeatLayout, SeatMapEntry,
    SeatStatisticsResponse,
};
use crate::utils::error::{is_foreign_key_violation, AppError, AppResult};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

// Business class first, then row, then letter
const SEAT_ORDER: &str =
    "CASE pl.seat_class WHEN 'BUS' THEN 1 ELSE 2 END, pl.row_number, pl.seat_letter";

#[derive(Clone)]
pub struct FlightService {
    pool: SqlitePool,
    seat_layout: SeatLayout,
}

impl FlightService {
    pub fn new(pool: SqlitePool, seat_layout: SeatLayout) -> Self {
        FlightService { pool, seat_layout }
    }

    pub fn seat_layout(&self) -> &SeatLayout {
        &self.seat_layout
    }

    pub async fn list_flights(&self) -> AppResult<Vec<FlightDetail>> {
        let flights = sqlx::query_as::<_, FlightDetail>(
            r#"
            SELECT
                f.id,
                f.flight_number,
                a.name AS airplane_name,
                ap.start_code || ' - ' || ap.finish_code AS route,
                f.departure_time,
                c.name AS company_name,
                f.airplane_id,
                f.airport_id
            FROM flight f
            JOIN airplane a ON f.airplane_id = a.id
            JOIN airport ap ON f.airport_id = ap.id
            JOIN company c ON a.company_id = c.id
            ORDER BY f.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(flights)
    }

    // Substring search on route codes, case-insensitive; empty filters match everything
    pub async fn search_flights(&self, query: FlightSearchQuery) -> AppResult<Vec<FlightSearchResult>> {
        let start = query.start_code.unwrap_or_default();
        let finish = query.finish_code.unwrap_or_default();

        let flights = sqlx::query_as::<_, FlightSearchResult>(
            r#"
            SELECT f.id, f.flight_number, ap.start_code, ap.finish_code,
                   f.departure_time, c.name AS company_name
            FROM flight f
            JOIN airplane a ON f.airplane_id = a.id
            JOIN airport ap ON f.airport_id = ap.id
            JOIN company c ON a.company_id = c.id
            WHERE ap.start_code LIKE '%' || ? || '%'
            AND ap.finish_code LIKE '%' || ? || '%'
            ORDER BY f.id
            "#,
        )
        .bind(start.trim())
        .bind(finish.trim())
        .fetch_all(&self.pool)
        .await?;

        Ok(flights)
    }

    pub async fn get_flight(&self, flight_id: i64) -> AppResult<Flight> {
        sqlx::query_as::<_, Flight>(
            "SELECT id, airplane_id, airport_id, flight_number, departure_time FROM flight WHERE id = ?",
        )
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Flight not found".into()))
    }

    /// Insert the flight and its whole seat grid in one transaction.
    pub async fn add_flight(&self, request: NewFlightRequest) -> AppResult<i64> {
        let departure_time = normalize_departure_time(&request.departure_time)
            .ok_or_else(|| AppError::ValidationError("Departure time must be HH:MM".into()))?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO flight (airplane_id, airport_id, flight_number, departure_time)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(request.airplane_id)
        .bind(request.airport_id)
        .bind(request.flight_number)
        .bind(&departure_time)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::Unprocessable("Unknown airplane or route".into())
            } else {
                AppError::from(e)
            }
        })?;

        let flight_id = result.last_insert_rowid();

        // Dropping the transaction on error rolls the flight row back too
        for seat in self.seat_layout.generate(flight_id) {
            sqlx::query(
                r#"
                INSERT INTO place (flight_id, seat_class, row_number, seat_letter, seat_label)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(seat.flight_id)
            .bind(seat.seat_class)
            .bind(seat.row_number)
            .bind(&seat.seat_letter)
            .bind(&seat.seat_label)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        log::info!(
            "Created flight {} (number {}) with its seat grid",
            flight_id,
            request.flight_number
        );
        Ok(flight_id)
    }

    pub async fn update_flight(&self, flight_id: i64, request: UpdateFlightRequest) -> AppResult<()> {
        if request.is_empty() {
            return Err(AppError::ValidationError("Nothing to update".into()));
        }

        let departure_time = match &request.departure_time {
            Some(value) => Some(normalize_departure_time(value).ok_or_else(|| {
                AppError::ValidationError("Departure time must be HH:MM".into())
            })?),
            None => None,
        };

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE flight SET ");
        let mut fields = builder.separated(", ");
        if let Some(airplane_id) = request.airplane_id {
            fields.push("airplane_id = ").push_bind_unseparated(airplane_id);
        }
        if let Some(airport_id) = request.airport_id {
            fields.push("airport_id = ").push_bind_unseparated(airport_id);
        }
        if let Some(flight_number) = request.flight_number {
            fields.push("flight_number = ").push_bind_unseparated(flight_number);
        }
        if let Some(departure_time) = departure_time {
            fields.push("departure_time = ").push_bind_unseparated(departure_time);
        }
        builder.push(" WHERE id = ").push_bind(flight_id);

        let result = builder.build().execute(&self.pool).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                AppError::Unprocessable("Unknown airplane or route".into())
            } else {
                AppError::from(e)
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Flight not found".into()));
        }
        Ok(())
    }

    /// Remove the flight with its bookings and seats.
    pub async fn delete_flight(&self, flight_id: i64) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM booking WHERE flight_id = ?")
            .bind(flight_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM place WHERE flight_id = ?")
            .bind(flight_id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM flight WHERE id = ?")
            .bind(flight_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::NotFound("Flight not found".into()));
        }

        tx.commit().await?;
        log::info!("Deleted flight {} with its seats and bookings", flight_id);
        Ok(())
    }

    pub async fn get_all_seats(&self, flight_id: i64) -> AppResult<Vec<Seat>> {
        let seats = sqlx::query_as::<_, Seat>(&format!(
            r#"
            SELECT pl.id, pl.flight_id, pl.seat_class, pl.row_number, pl.seat_letter, pl.seat_label
            FROM place pl
            WHERE pl.flight_id = ?
            ORDER BY {}
            "#,
            SEAT_ORDER
        ))
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    // Seats with no active booking on this flight
    pub async fn get_available_seats(&self, flight_id: i64) -> AppResult<Vec<AvailableSeat>> {
        let seats = sqlx::query_as::<_, AvailableSeat>(&format!(
            r#"
            SELECT pl.id, pl.seat_class, pl.row_number, pl.seat_letter,
                   pl.seat_label || ' (' || pl.seat_class || ')' AS display_name
            FROM place pl
            WHERE pl.flight_id = ?
            AND pl.id NOT IN (
                SELECT seat_id FROM booking
                WHERE flight_id = ? AND status = 1
            )
            ORDER BY {}
            "#,
            SEAT_ORDER
        ))
        .bind(flight_id)
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    pub async fn get_seat_map(&self, flight_id: i64) -> AppResult<Vec<SeatMapEntry>> {
        let seats = sqlx::query_as::<_, SeatMapEntry>(&format!(
            r#"
            SELECT pl.id, pl.seat_class, pl.row_number, pl.seat_letter, pl.seat_label,
                   EXISTS (
                       SELECT 1 FROM booking b
                       WHERE b.seat_id = pl.id AND b.flight_id = pl.flight_id AND b.status = 1
                   ) AS occupied
            FROM place pl
            WHERE pl.flight_id = ?
            ORDER BY {}
            "#,
            SEAT_ORDER
        ))
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(seats)
    }

    pub async fn find_seat_by_details(
        &self,
        flight_id: i64,
        seat_class: SeatClass,
        row_number: i32,
        seat_letter: &str,
    ) -> AppResult<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>(
            r#"
            SELECT id, flight_id, seat_class, row_number, seat_letter, seat_label
            FROM place
            WHERE flight_id = ? AND seat_class = ? AND row_number = ? AND seat_letter = ?
            "#,
        )
        .bind(flight_id)
        .bind(seat_class)
        .bind(row_number)
        .bind(seat_letter.trim().to_ascii_uppercase())
        .fetch_optional(&self.pool)
        .await?;

        Ok(seat)
    }

    /// Look a seat up by its label, e.g. `2B`; malformed labels find nothing.
    pub async fn get_seat_by_label(&self, flight_id: i64, label: &str) -> AppResult<Option<Seat>> {
        let Some((row_number, seat_letter)) = parse_seat_label(label) else {
            return Ok(None);
        };

        let seat = sqlx::query_as::<_, Seat>(
            r#"
            SELECT id, flight_id, seat_class, row_number, seat_letter, seat_label
            FROM place
            WHERE flight_id = ? AND row_number = ? AND seat_letter = ?
            ORDER BY CASE seat_class WHEN 'BUS' THEN 1 ELSE 2 END
            LIMIT 1
            "#,
        )
        .bind(flight_id)
        .bind(row_number)
        .bind(seat_letter.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(seat)
    }

    /// Per-class occupancy; classes without seat rows report nominal capacity.
    pub async fn get_seat_statistics(&self, flight_id: i64) -> AppResult<SeatStatisticsResponse> {
        let rows: Vec<(SeatClass, i64, i64)> = sqlx::query_as(
            r#"
            SELECT
                p.seat_class,
                COUNT(p.id) AS total,
                COUNT(DISTINCT b.seat_id) AS booked
            FROM place p
            LEFT JOIN booking b ON p.id = b.seat_id
                AND b.status = 1
                AND b.flight_id = ?
            WHERE p.flight_id = ?
            GROUP BY p.seat_class
            "#,
        )
        .bind(flight_id)
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;

        let classes = self
            .seat_layout
            .classes
            .iter()
            .map(|layout| {
                match rows.iter().find(|(class, _, _)| *class == layout.seat_class) {
                    Some((class, total, booked)) => ClassStatistics::new(*class, *total, *booked),
                    None => ClassStatistics::new(layout.seat_class, layout.capacity(), 0),
                }
            })
            .collect();

        Ok(SeatStatisticsResponse { flight_id, classes })
    }
}
