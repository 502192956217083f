pub mod booking;
pub mod fleet;
pub mod flight;
pub mod passenger;
pub mod report;
pub mod seat;
pub mod user;
