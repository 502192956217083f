#![allow(dead_code)]

use airline_reservation_system::db::Database;
use airline_reservation_system::models::fleet::{
    NewAirplaneRequest, NewAirportRequest, NewCompanyRequest,
};
use airline_reservation_system::models::flight::NewFlightRequest;
use airline_reservation_system::models::passenger::NewPassengerRequest;
use airline_reservation_system::models::seat::SeatLayout;
use airline_reservation_system::services::fleet_service::FleetService;
use airline_reservation_system::services::flight_service::FlightService;
use airline_reservation_system::services::passenger_service::PassengerService;
use airline_reservation_system::utils::error::AppResult;
use sqlx::sqlite::SqlitePool as Pool;
use sqlx::Error;
use std::path::PathBuf;

pub const TEST_JWT_SECRET: &str = "test-secret";

#[macro_export]
macro_rules! test_println {
    ($test_name:expr, $($arg:tt)*) => {
        println!("[{}] {}", $test_name, format!($($arg)*))
    };
}

pub struct TestDb {
    pub pool: Pool,
    path: Option<PathBuf>,
}

impl TestDb {
    // Every call gets its own in-memory database with the full schema
    pub async fn new() -> Result<Self, Error> {
        let database = Database::new("sqlite::memory:").await?;
        database.init_schema().await?;
        Ok(TestDb {
            pool: database.pool,
            path: None,
        })
    }

    /// Database file in the temp dir, for tests that need real file locking.
    pub async fn on_disk(name: &str) -> Result<Self, Error> {
        let path = std::env::temp_dir().join(format!("airline_{}_{}.db", name, std::process::id()));
        let _ = std::fs::remove_file(&path);

        let database = Database::new(&format!("sqlite://{}", path.display())).await?;
        database.init_schema().await?;
        Ok(TestDb {
            pool: database.pool,
            path: Some(path),
        })
    }

    pub async fn cleanup(self) {
        self.pool.close().await;
        if let Some(path) = self.path {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Ids of one company / airplane / route triple.
pub struct FleetFixture {
    pub company_id: i64,
    pub airplane_id: i64,
    pub airport_id: i64,
}

pub async fn create_fleet(pool: &Pool, company: &str, start: &str, finish: &str) -> AppResult<FleetFixture> {
    let fleet_service = FleetService::new(pool.clone());

    let company_id = fleet_service
        .add_company(NewCompanyRequest {
            name: company.to_string(),
        })
        .await?;
    let airplane_id = fleet_service
        .add_airplane(NewAirplaneRequest {
            name: format!("{} Boeing 737", company),
            company_id,
        })
        .await?;
    let airport_id = fleet_service
        .add_airport(NewAirportRequest {
            start_code: start.to_string(),
            finish_code: finish.to_string(),
        })
        .await?;

    Ok(FleetFixture {
        company_id,
        airplane_id,
        airport_id,
    })
}

pub async fn create_flight(pool: &Pool, fleet: &FleetFixture, flight_number: i32) -> AppResult<i64> {
    FlightService::new(pool.clone(), SeatLayout::default())
        .add_flight(NewFlightRequest {
            airplane_id: fleet.airplane_id,
            airport_id: fleet.airport_id,
            flight_number,
            departure_time: "14:30".to_string(),
        })
        .await
}

pub async fn create_passenger(pool: &Pool, first_name: &str, last_name: &str) -> AppResult<i64> {
    PassengerService::new(pool.clone())
        .add_passenger(NewPassengerRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: "+79161234567".to_string(),
            passport_number: "40 01 123456".to_string(),
        })
        .await
}
