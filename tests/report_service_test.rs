use airline_reservation_system::{
    models::booking::BookingRequest,
    models::seat::SeatLayout,
    services::{
        booking_service::BookingService,
        flight_service::FlightService,
        report_service::{ReportKind, ReportService},
    },
    utils::csv_export::{to_csv, REPORT_DELIMITER},
    utils::error::AppError,
};
use async_trait::async_trait;
use serde_json::json;
use sqlx::sqlite::SqlitePool as Pool;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{create_fleet, create_flight, create_passenger, TestDb};

struct ReportServiceContext {
    pool: Pool,
    report_service: ReportService,
}

// Two airlines; flight 101 has two active bookings and one cancelled, flight 202 none
async fn seed(pool: &Pool) -> Result<(), AppError> {
    let moscow = create_fleet(pool, "Aeroflot", "SVO", "LED").await?;
    let siberia = create_fleet(pool, "S7", "OVB", "DME").await?;
    let busy_flight = create_flight(pool, &moscow, 101).await?;
    create_flight(pool, &siberia, 202).await?;

    let frequent = create_passenger(pool, "Ivan", "Ivanov").await?;
    let occasional = create_passenger(pool, "Anna", "Petrova").await?;

    let flight_service = FlightService::new(pool.clone(), SeatLayout::default());
    let booking_service = BookingService::new(pool.clone(), flight_service.clone());

    for (label, passenger_id, status) in [
        ("1A", frequent, None),
        ("1B", frequent, None),
        ("5C", occasional, Some(false)),
    ] {
        let seat = flight_service
            .get_seat_by_label(busy_flight, label)
            .await?
            .ok_or_else(|| AppError::NotFound(label.to_string()))?;
        booking_service
            .create_booking(BookingRequest {
                flight_id: busy_flight,
                seat_id: seat.id,
                passenger_id,
                status,
            })
            .await?;
    }

    Ok(())
}

#[async_trait]
impl AsyncTestContext for ReportServiceContext {
    async fn setup() -> Self {
        let db = TestDb::new()
            .await
            .expect("Failed to create test database");
        seed(&db.pool).await.expect("Failed to seed reports data");

        ReportServiceContext {
            report_service: ReportService::new(db.pool.clone()),
            pool: db.pool,
        }
    }

    async fn teardown(self) {
        self.pool.close().await;
    }
}

#[test_context(ReportServiceContext)]
#[tokio::test]
async fn test_company_flights(ctx: &ReportServiceContext) -> Result<(), AppError> {
    let table = ctx.report_service.company_flights().await?;
    assert_eq!(table.columns, vec!["company", "flights", "airplanes"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0], vec![json!("Aeroflot"), json!(1), json!(1)]);

    Ok(())
}

#[test_context(ReportServiceContext)]
#[tokio::test]
async fn test_passenger_stats_respects_limit(ctx: &ReportServiceContext) -> Result<(), AppError> {
    let table = ctx.report_service.run(ReportKind::PassengerStats, None).await?;
    assert_eq!(table.columns, vec!["passenger", "passport_number", "active_bookings"]);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][0], json!("Ivan Ivanov"));
    assert_eq!(table.rows[0][2], json!(2));
    // Cancelled bookings do not count
    assert_eq!(table.rows[1][2], json!(0));

    let top = ctx.report_service.run(ReportKind::PassengerStats, Some(1)).await?;
    assert_eq!(top.rows.len(), 1);

    Ok(())
}

#[test_context(ReportServiceContext)]
#[tokio::test]
async fn test_seat_occupancy_reports(ctx: &ReportServiceContext) -> Result<(), AppError> {
    let occupancy = ctx.report_service.seat_occupancy().await?;
    assert_eq!(
        occupancy.columns,
        vec!["flight_number", "total_seats", "booked_seats", "free_seats"]
    );
    assert_eq!(occupancy.rows[0], vec![json!(101), json!(52), json!(2), json!(50)]);
    assert_eq!(occupancy.rows[1], vec![json!(202), json!(52), json!(0), json!(52)]);

    let by_class = ctx.report_service.run(ReportKind::SeatClassStats, None).await?;
    assert_eq!(by_class.rows.len(), 2);
    assert_eq!(by_class.rows[0][0], json!("BUS"));
    assert_eq!(by_class.rows[0][1], json!(24));
    assert_eq!(by_class.rows[0][2], json!(2));
    let rate = by_class.rows[0][3].as_f64().expect("rate is numeric");
    assert!((rate - 8.33).abs() < 1e-9);

    let by_flight = ctx.report_service.flight_occupancy().await?;
    assert_eq!(by_flight.rows[0][0], json!(101));
    let rate = by_flight.rows[0][3].as_f64().expect("rate is numeric");
    assert!((rate - 3.85).abs() < 1e-9);

    Ok(())
}

#[test_context(ReportServiceContext)]
#[tokio::test]
async fn test_booking_activity_reports(ctx: &ReportServiceContext) -> Result<(), AppError> {
    let by_day = ctx.report_service.run(ReportKind::BookingsByDay, None).await?;
    assert_eq!(by_day.columns, vec!["booking_date", "bookings_count"]);
    assert_eq!(by_day.rows.len(), 1);
    assert_eq!(by_day.rows[0][1], json!(2));

    let routes = ctx.report_service.run(ReportKind::PopularRoutes, None).await?;
    assert_eq!(routes.rows, vec![vec![json!("SVO"), json!("LED"), json!(2)]]);

    Ok(())
}

#[test_context(ReportServiceContext)]
#[tokio::test]
async fn test_report_csv_export(ctx: &ReportServiceContext) -> Result<(), AppError> {
    let table = ctx.report_service.seat_occupancy().await?;
    let bytes = to_csv(&table, REPORT_DELIMITER)?;

    assert!(bytes.starts_with(b"\xEF\xBB\xBF"), "Export starts with a UTF-8 BOM");
    let text = String::from_utf8(bytes[3..].to_vec()).expect("valid UTF-8");
    assert_eq!(
        text,
        "flight_number;total_seats;booked_seats;free_seats\n101;52;2;50\n202;52;0;52\n"
    );

    Ok(())
}

#[tokio::test]
async fn test_empty_report_keeps_its_header() -> Result<(), AppError> {
    let db = TestDb::new().await?;
    let report_service = ReportService::new(db.pool.clone());

    let table = report_service.company_flights().await?;
    assert_eq!(table.columns, vec!["company", "flights", "airplanes"]);
    assert!(table.rows.is_empty());
    let bytes = to_csv(&table, REPORT_DELIMITER)?;
    assert_eq!(&bytes[3..], b"company;flights;airplanes\n");

    let stats = report_service.run(ReportKind::PassengerStats, Some(5)).await?;
    assert_eq!(stats.columns, vec!["passenger", "passport_number", "active_bookings"]);
    assert!(stats.rows.is_empty());

    db.pool.close().await;
    Ok(())
}

#[test]
fn test_report_kind_names() {
    assert_eq!(
        "seat-class-stats".parse::<ReportKind>().ok(),
        Some(ReportKind::SeatClassStats)
    );
    assert_eq!(ReportKind::BookingsByDay.to_string(), "bookings-by-day");
    assert!("unknown-report".parse::<ReportKind>().is_err());
}
