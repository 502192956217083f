#[macro_use]
extern crate rocket;
extern crate rocket_okapi;

pub mod config;
pub mod db;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::booking_service::BookingService;
use crate::services::console_service::ConsoleService;
use crate::services::fleet_service::FleetService;
use crate::services::flight_service::FlightService;
use crate::services::passenger_service::PassengerService;
use crate::services::report_service::ReportService;
use crate::services::user_service::UserService;
use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::swagger_ui::{make_swagger_ui, SwaggerUIConfig};
use sqlx::SqlitePool;

/// Assemble the HTTP application around an already initialized pool.
pub fn build_rocket(config: AppConfig, pool: SqlitePool) -> Rocket<Build> {
    let flight_service = FlightService::new(pool.clone(), config.seat_layout.clone());
    let booking_service = BookingService::new(pool.clone(), flight_service.clone());
    let user_service = UserService::new(
        pool.clone(),
        config.jwt_secret.clone(),
        config.token_ttl_hours,
    );

    rocket::build()
        .manage(config)
        .manage(user_service)
        .manage(flight_service)
        .manage(booking_service)
        .manage(FleetService::new(pool.clone()))
        .manage(PassengerService::new(pool.clone()))
        .manage(ReportService::new(pool.clone()))
        .manage(ConsoleService::new(pool))
        .mount(
            "/api",
            openapi_get_routes![
                routes::user_route::register,
                routes::user_route::login,
                routes::user_route::list_users,
                routes::user_route::set_user_role,
                routes::user_route::delete_user,
                routes::fleet_route::list_companies,
                routes::fleet_route::add_company,
                routes::fleet_route::delete_company,
                routes::fleet_route::list_airplanes,
                routes::fleet_route::add_airplane,
                routes::fleet_route::list_airports,
                routes::fleet_route::add_airport,
                routes::flight_route::list_flights,
                routes::flight_route::search_flights,
                routes::flight_route::get_flight,
                routes::flight_route::add_flight,
                routes::flight_route::update_flight,
                routes::flight_route::delete_flight,
                routes::flight_route::get_seats,
                routes::flight_route::get_available_seats,
                routes::flight_route::get_seat_by_label,
                routes::flight_route::check_seat,
                routes::flight_route::get_seat_map,
                routes::flight_route::get_seat_statistics,
                routes::passenger_route::list_passengers,
                routes::passenger_route::get_passenger,
                routes::passenger_route::add_passenger,
                routes::passenger_route::delete_passenger,
                routes::booking_route::list_bookings,
                routes::booking_route::get_booking,
                routes::booking_route::create_booking,
                routes::booking_route::cancel_booking,
                routes::booking_route::confirm_booking,
                routes::booking_route::cancel_all_flight_bookings,
                routes::report_route::run_report,
                routes::console_route::execute,
                routes::console_route::history,
            ],
        )
        .mount(
            "/api",
            routes![
                routes::report_route::export_report,
                routes::console_route::export_csv,
            ],
        )
        .mount(
            "/swagger",
            make_swagger_ui(&SwaggerUIConfig {
                url: "/api/openapi.json".to_string(),
                ..Default::default()
            }),
        )
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
