pub mod booking_route;
pub mod console_route;
pub mod fleet_route;
pub mod flight_route;
pub mod passenger_route;
pub mod report_route;
pub mod user_route;
