use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

// Tables, indexes and reporting views, created idempotently on startup
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS company (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS airplane (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        company_id INTEGER NOT NULL REFERENCES company(id)
    )",
    "CREATE TABLE IF NOT EXISTS airport (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        start_code TEXT NOT NULL,
        finish_code TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS flight (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        airplane_id INTEGER NOT NULL REFERENCES airplane(id),
        airport_id INTEGER NOT NULL REFERENCES airport(id),
        flight_number INTEGER NOT NULL,
        departure_time TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS place (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        flight_id INTEGER NOT NULL REFERENCES flight(id),
        seat_class TEXT NOT NULL CHECK (seat_class IN ('BUS', 'ECO')),
        row_number INTEGER NOT NULL,
        seat_letter TEXT NOT NULL,
        seat_label TEXT NOT NULL,
        CONSTRAINT place_seat_uindex UNIQUE (flight_id, seat_class, row_number, seat_letter)
    )",
    "CREATE TABLE IF NOT EXISTS passenger (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        phone TEXT NOT NULL,
        passport_number TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS booking (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        flight_id INTEGER NOT NULL REFERENCES flight(id),
        seat_id INTEGER NOT NULL REFERENCES place(id),
        passenger_id INTEGER NOT NULL REFERENCES passenger(id),
        booking_time DATETIME NOT NULL,
        status BOOLEAN NOT NULL DEFAULT 1
    )",
    // At most one active booking per seat and flight
    "CREATE UNIQUE INDEX IF NOT EXISTS booking_active_seat_uindex
        ON booking (flight_id, seat_id) WHERE status = 1",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nickname TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'EMPLOYEE' CHECK (role IN ('ADMIN', 'SENIOR', 'EMPLOYEE'))
    )",
    "CREATE VIEW IF NOT EXISTS report_passengers_simple AS
        SELECT p.first_name || ' ' || p.last_name AS passenger,
               p.passport_number AS passport_number,
               COUNT(b.id) AS active_bookings
        FROM passenger p
        LEFT JOIN booking b ON b.passenger_id = p.id AND b.status = 1
        GROUP BY p.id
        ORDER BY active_bookings DESC, passenger",
    "CREATE VIEW IF NOT EXISTS report_seat_occupancy_simple AS
        SELECT f.flight_number AS flight_number,
               COUNT(pl.id) AS total_seats,
               COUNT(b.id) AS booked_seats,
               COUNT(pl.id) - COUNT(b.id) AS free_seats
        FROM flight f
        LEFT JOIN place pl ON pl.flight_id = f.id
        LEFT JOIN booking b ON b.seat_id = pl.id AND b.flight_id = f.id AND b.status = 1
        GROUP BY f.id
        ORDER BY f.flight_number",
    "CREATE VIEW IF NOT EXISTS report_seat_class_stats AS
        SELECT pl.seat_class AS seat_class,
               COUNT(pl.id) AS total_seats,
               COUNT(b.id) AS booked_seats,
               ROUND(COUNT(b.id) * 100.0 / COUNT(pl.id), 2) AS occupancy_rate
        FROM place pl
        LEFT JOIN booking b ON b.seat_id = pl.id AND b.status = 1
        GROUP BY pl.seat_class
        ORDER BY pl.seat_class",
];

// Database connection manager
pub struct Database {
    pub pool: SqlitePool,
}

impl Database {
    // Create a new database connection pool
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            // Concurrent writers wait for the lock instead of failing with BUSY
            .busy_timeout(Duration::from_secs(5));

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(3));

        // An in-memory database lives only as long as one of its connections
        if database_url.contains(":memory:") {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;

        Ok(Database { pool })
    }

    // Create tables, indexes and views if they do not exist yet
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        for statement in SCHEMA {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        log::info!("Database schema ready");
        Ok(())
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
