pub mod booking_service;
pub mod console_service;
pub mod fleet_service;
pub mod flight_service;
pub mod passenger_service;
pub mod report_service;
pub mod user_service;
