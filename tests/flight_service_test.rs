use airline_reservation_system::{
    models::booking::BookingRequest,
    models::flight::{FlightSearchQuery, NewFlightRequest, UpdateFlightRequest},
    models::seat::{SeatClass, SeatLayout},
    services::{booking_service::BookingService, flight_service::FlightService},
    utils::error::AppError,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePool as Pool;
use std::collections::HashSet;
use test_context::{test_context, AsyncTestContext};

mod common {
    pub mod test_utils;
}
use common::test_utils::{create_fleet, create_flight, create_passenger, TestDb};

struct FlightServiceContext {
    pool: Pool,
    flight_service: FlightService,
    booking_service: BookingService,
}

#[async_trait]
impl AsyncTestContext for FlightServiceContext {
    async fn setup() -> Self {
        let db = TestDb::new()
            .await
            .expect("Failed to create test database");

        let flight_service = FlightService::new(db.pool.clone(), SeatLayout::default());
        let booking_service = BookingService::new(db.pool.clone(), flight_service.clone());

        FlightServiceContext {
            pool: db.pool,
            flight_service,
            booking_service,
        }
    }

    async fn teardown(self) {
        self.pool.close().await;
    }
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_add_flight_generates_seat_grid(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let fleet = create_fleet(&ctx.pool, "Aeroflot", "SVO", "LED").await?;
    let flight_id = create_flight(&ctx.pool, &fleet, 777).await?;

    let seats = ctx.flight_service.get_all_seats(flight_id).await?;
    assert_eq!(seats.len(), 52, "A flight gets 12 business and 40 economy seats");

    let business = seats.iter().filter(|s| s.seat_class == SeatClass::Bus).count();
    let economy = seats.iter().filter(|s| s.seat_class == SeatClass::Eco).count();
    assert_eq!(business, 12);
    assert_eq!(economy, 40);

    let triples: HashSet<_> = seats
        .iter()
        .map(|s| (s.seat_class, s.row_number, s.seat_letter.clone()))
        .collect();
    assert_eq!(triples.len(), seats.len(), "Seat triples must be unique");

    // Business class comes first, ordered by row then letter
    assert_eq!(seats[0].seat_class, SeatClass::Bus);
    assert_eq!(seats[0].seat_label, "1A");
    assert_eq!(seats[12].seat_class, SeatClass::Eco);
    assert_eq!(seats[12].seat_label, "1A");

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_add_flight_with_unknown_airplane_leaves_nothing_behind(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    let fleet = create_fleet(&ctx.pool, "Pobeda", "VKO", "AER").await?;

    let result = ctx
        .flight_service
        .add_flight(NewFlightRequest {
            airplane_id: 9999,
            airport_id: fleet.airport_id,
            flight_number: 100,
            departure_time: "08:15".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::Unprocessable(_))));

    let flights: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flight")
        .fetch_one(&ctx.pool)
        .await?;
    let seats: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM place")
        .fetch_one(&ctx.pool)
        .await?;
    assert_eq!(flights, 0);
    assert_eq!(seats, 0);

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_add_flight_rejects_bad_time(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let fleet = create_fleet(&ctx.pool, "S7", "OVB", "DME").await?;

    let result = ctx
        .flight_service
        .add_flight(NewFlightRequest {
            airplane_id: fleet.airplane_id,
            airport_id: fleet.airport_id,
            flight_number: 101,
            departure_time: "25:99".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_list_and_search_flights(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let to_spb = create_fleet(&ctx.pool, "Aeroflot", "SVO", "LED").await?;
    let to_sochi = create_fleet(&ctx.pool, "Pobeda", "VKO", "AER").await?;
    create_flight(&ctx.pool, &to_spb, 10).await?;
    create_flight(&ctx.pool, &to_sochi, 20).await?;

    let flights = ctx.flight_service.list_flights().await?;
    assert_eq!(flights.len(), 2);
    assert_eq!(flights[0].route, "SVO - LED");
    assert_eq!(flights[0].company_name, "Aeroflot");
    assert_eq!(flights[1].departure_time, "14:30");

    let found = ctx
        .flight_service
        .search_flights(FlightSearchQuery {
            start_code: Some("vk".to_string()),
            finish_code: None,
        })
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].flight_number, 20);
    assert_eq!(found[0].finish_code, "AER");

    let everything = ctx
        .flight_service
        .search_flights(FlightSearchQuery::default())
        .await?;
    assert_eq!(everything.len(), 2);

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_update_flight(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let fleet = create_fleet(&ctx.pool, "Aeroflot", "SVO", "LED").await?;
    let flight_id = create_flight(&ctx.pool, &fleet, 777).await?;

    ctx.flight_service
        .update_flight(
            flight_id,
            UpdateFlightRequest {
                flight_number: Some(778),
                departure_time: Some("9:05".to_string()),
                ..Default::default()
            },
        )
        .await?;

    let flight = ctx.flight_service.get_flight(flight_id).await?;
    assert_eq!(flight.flight_number, 778);
    assert_eq!(flight.departure_time, "09:05");
    assert_eq!(flight.airplane_id, fleet.airplane_id);

    let empty = ctx
        .flight_service
        .update_flight(flight_id, UpdateFlightRequest::default())
        .await;
    assert!(matches!(empty, Err(AppError::ValidationError(_))));

    let missing = ctx
        .flight_service
        .update_flight(
            flight_id + 100,
            UpdateFlightRequest {
                flight_number: Some(1),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_delete_flight_removes_seats_and_bookings(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    let fleet = create_fleet(&ctx.pool, "Aeroflot", "SVO", "LED").await?;
    let flight_id = create_flight(&ctx.pool, &fleet, 777).await?;
    let other_flight_id = create_flight(&ctx.pool, &fleet, 778).await?;
    let passenger_id = create_passenger(&ctx.pool, "Ivan", "Ivanov").await?;

    let seats = ctx.flight_service.get_all_seats(flight_id).await?;
    for seat in seats.iter().take(3) {
        ctx.booking_service
            .create_booking(BookingRequest {
                flight_id,
                seat_id: seat.id,
                passenger_id,
                status: None,
            })
            .await?;
    }

    ctx.flight_service.delete_flight(flight_id).await?;

    let orphan_bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM booking WHERE flight_id = ?")
        .bind(flight_id)
        .fetch_one(&ctx.pool)
        .await?;
    let orphan_seats: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM place WHERE flight_id = ?")
        .bind(flight_id)
        .fetch_one(&ctx.pool)
        .await?;
    assert_eq!(orphan_bookings, 0);
    assert_eq!(orphan_seats, 0);
    assert!(matches!(
        ctx.flight_service.get_flight(flight_id).await,
        Err(AppError::NotFound(_))
    ));

    // The other flight is untouched
    assert_eq!(ctx.flight_service.get_all_seats(other_flight_id).await?.len(), 52);

    assert!(matches!(
        ctx.flight_service.delete_flight(flight_id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_find_seats_by_details_and_label(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let fleet = create_fleet(&ctx.pool, "Aeroflot", "SVO", "LED").await?;
    let flight_id = create_flight(&ctx.pool, &fleet, 777).await?;

    let seat = ctx
        .flight_service
        .find_seat_by_details(flight_id, SeatClass::Eco, 10, "d")
        .await?
        .expect("economy 10D exists");
    assert_eq!(seat.seat_label, "10D");

    let missing = ctx
        .flight_service
        .find_seat_by_details(flight_id, SeatClass::Bus, 10, "D")
        .await?;
    assert!(missing.is_none(), "Business class has only 3 rows");

    let by_label = ctx
        .flight_service
        .get_seat_by_label(flight_id, "2b")
        .await?
        .expect("2B exists");
    assert_eq!(by_label.seat_class, SeatClass::Bus);
    assert_eq!(by_label.row_number, 2);

    let economy_only = ctx
        .flight_service
        .get_seat_by_label(flight_id, "7C")
        .await?
        .expect("7C exists");
    assert_eq!(economy_only.seat_class, SeatClass::Eco);

    assert!(ctx.flight_service.get_seat_by_label(flight_id, "C7").await?.is_none());

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_available_seats_and_seat_map(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let fleet = create_fleet(&ctx.pool, "Aeroflot", "SVO", "LED").await?;
    let flight_id = create_flight(&ctx.pool, &fleet, 777).await?;
    let passenger_id = create_passenger(&ctx.pool, "Anna", "Petrova").await?;

    let available = ctx.flight_service.get_available_seats(flight_id).await?;
    assert_eq!(available.len(), 52);
    assert_eq!(available[0].display_name, "1A (BUS)");

    let booked_seat = available[0].id;
    ctx.booking_service
        .create_booking(BookingRequest {
            flight_id,
            seat_id: booked_seat,
            passenger_id,
            status: None,
        })
        .await?;

    let available = ctx.flight_service.get_available_seats(flight_id).await?;
    assert_eq!(available.len(), 51);
    assert!(available.iter().all(|s| s.id != booked_seat));

    let map = ctx.flight_service.get_seat_map(flight_id).await?;
    assert_eq!(map.len(), 52);
    assert_eq!(map.iter().filter(|s| s.occupied).count(), 1);
    assert!(map.iter().any(|s| s.id == booked_seat && s.occupied));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_seat_statistics(ctx: &FlightServiceContext) -> Result<(), AppError> {
    let fleet = create_fleet(&ctx.pool, "Aeroflot", "SVO", "LED").await?;
    let flight_id = create_flight(&ctx.pool, &fleet, 777).await?;

    let stats = ctx.flight_service.get_seat_statistics(flight_id).await?;
    assert_eq!(stats.classes.len(), 2);
    let business = &stats.classes[0];
    assert_eq!(business.seat_class, SeatClass::Bus);
    assert_eq!((business.total, business.booked, business.available), (12, 0, 12));
    assert_eq!(business.percentage.to_string(), "0.00");

    // Book six of the twelve business seats
    let seats = ctx.flight_service.get_all_seats(flight_id).await?;
    for (i, seat) in seats
        .iter()
        .filter(|s| s.seat_class == SeatClass::Bus)
        .take(6)
        .enumerate()
    {
        let passenger_id = create_passenger(&ctx.pool, &format!("P{}", i), "Business").await?;
        ctx.booking_service
            .create_booking(BookingRequest {
                flight_id,
                seat_id: seat.id,
                passenger_id,
                status: None,
            })
            .await?;
    }

    let stats = ctx.flight_service.get_seat_statistics(flight_id).await?;
    let business = &stats.classes[0];
    let economy = &stats.classes[1];
    assert_eq!((business.total, business.booked, business.available), (12, 6, 6));
    assert_eq!(business.percentage, Decimal::new(5000, 2));
    assert_eq!(business.percentage.to_string(), "50.00");
    assert_eq!((economy.total, economy.booked), (40, 0));

    Ok(())
}

#[test_context(FlightServiceContext)]
#[tokio::test]
async fn test_seat_statistics_fall_back_to_nominal_capacity(
    ctx: &FlightServiceContext,
) -> Result<(), AppError> {
    // No such flight, so no seat rows at all
    let stats = ctx.flight_service.get_seat_statistics(4242).await?;
    assert_eq!(stats.classes.len(), 2);
    assert_eq!(stats.classes[0].seat_class, SeatClass::Bus);
    assert_eq!(stats.classes[0].total, 12);
    assert_eq!(stats.classes[1].seat_class, SeatClass::Eco);
    assert_eq!(stats.classes[1].total, 40);
    assert!(stats.classes.iter().all(|c| c.booked == 0 && c.percentage.is_zero()));

    Ok(())
}
