use crate::models::report::TabularResult;
use crate::utils::error::AppResult;
use crate::utils::tabular::rows_to_table;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sqlx::{Executor, SqlitePool, Statement};
use strum_macros::{Display, EnumString};

pub const DEFAULT_PASSENGER_REPORT_LIMIT: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportKind {
    CompanyFlights,
    PassengerStats,
    SeatOccupancy,
    SeatClassStats,
    FlightOccupancy,
    BookingsByDay,
    PopularRoutes,
}

#[derive(Clone)]
pub struct ReportService {
    pool: SqlitePool,
}

impl ReportService {
    pub fn new(pool: SqlitePool) -> Self {
        ReportService { pool }
    }

    pub async fn run(&self, kind: ReportKind, limit: Option<i64>) -> AppResult<TabularResult> {
        match kind {
            ReportKind::CompanyFlights => self.company_flights().await,
            ReportKind::PassengerStats => {
                self.passenger_stats(limit.unwrap_or(DEFAULT_PASSENGER_REPORT_LIMIT))
                    .await
            }
            ReportKind::SeatOccupancy => self.seat_occupancy().await,
            ReportKind::SeatClassStats => self.seat_class_stats().await,
            ReportKind::FlightOccupancy => self.flight_occupancy().await,
            ReportKind::BookingsByDay => self.bookings_by_day().await,
            ReportKind::PopularRoutes => self.popular_routes().await,
        }
    }

    async fn table(&self, sql: &str) -> AppResult<TabularResult> {
        let statement = self.pool.prepare(sql).await?;
        let rows = statement.query().fetch_all(&self.pool).await?;
        Ok(rows_to_table(statement.columns(), &rows))
    }

    pub async fn company_flights(&self) -> AppResult<TabularResult> {
        self.table(
            r#"
            SELECT
                c.name AS company,
                COUNT(DISTINCT f.id) AS flights,
                COUNT(DISTINCT a.id) AS airplanes
            FROM company c
            LEFT JOIN airplane a ON c.id = a.company_id
            LEFT JOIN flight f ON a.id = f.airplane_id
            GROUP BY c.id
            ORDER BY COUNT(DISTINCT f.id) DESC, c.name
            "#,
        )
        .await
    }

    pub async fn passenger_stats(&self, limit: i64) -> AppResult<TabularResult> {
        let statement = self
            .pool
            .prepare("SELECT * FROM report_passengers_simple LIMIT ?")
            .await?;
        let rows = statement
            .query()
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows_to_table(statement.columns(), &rows))
    }

    pub async fn seat_occupancy(&self) -> AppResult<TabularResult> {
        self.table("SELECT * FROM report_seat_occupancy_simple").await
    }

    pub async fn seat_class_stats(&self) -> AppResult<TabularResult> {
        self.table("SELECT * FROM report_seat_class_stats").await
    }

    pub async fn flight_occupancy(&self) -> AppResult<TabularResult> {
        self.table(
            r#"
            SELECT f.flight_number,
                   COUNT(pl.id) AS total_seats,
                   COUNT(b.id) AS booked_seats,
                   ROUND(COUNT(b.id) * 100.0 / COUNT(pl.id), 2) AS occupancy_rate
            FROM flight f
            LEFT JOIN place pl ON f.id = pl.flight_id
            LEFT JOIN booking b ON pl.id = b.seat_id AND b.status = 1
            GROUP BY f.flight_number
            ORDER BY occupancy_rate DESC, f.flight_number
            "#,
        )
        .await
    }

    pub async fn bookings_by_day(&self) -> AppResult<TabularResult> {
        self.table(
            r#"
            SELECT DATE(booking_time) AS booking_date,
                   COUNT(*) AS bookings_count
            FROM booking
            WHERE status = 1
            GROUP BY DATE(booking_time)
            ORDER BY booking_date DESC
            LIMIT 30
            "#,
        )
        .await
    }

    pub async fn popular_routes(&self) -> AppResult<TabularResult> {
        self.table(
            r#"
            SELECT ap.start_code, ap.finish_code,
                   COUNT(b.id) AS bookings_count
            FROM booking b
            JOIN flight f ON b.flight_id = f.id
            JOIN airport ap ON f.airport_id = ap.id
            WHERE b.status = 1
            GROUP BY ap.start_code, ap.finish_code
            ORDER BY bookings_count DESC, ap.start_code
            LIMIT 10
            "#,
        )
        .await
    }
}
