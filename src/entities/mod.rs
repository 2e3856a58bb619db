mod booking;
mod category;
mod fare;
mod route;

pub use booking::{Booking, NewBooking};
pub use category::Category;
pub use fare::{round_money, FareQuote, FareRule, FareTable};
pub use route::RouteMetrics;
