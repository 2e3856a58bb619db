pub mod bookings;
pub mod fares;
pub mod health;
