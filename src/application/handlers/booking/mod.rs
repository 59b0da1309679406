//! Booking command and query handlers.

mod cancel_booking;
mod create_booking;
mod get_availability;
mod get_booking;
mod list_bookings;
mod set_booking_status;
mod set_schedule;

pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler, ItemSelection};
pub use get_availability::{GetAvailabilityHandler, GetAvailabilityQuery};
pub use get_booking::{GetBookingHandler, GetBookingQuery};
pub use list_bookings::{ListBookingsHandler, ListBookingsQuery};
pub use set_booking_status::{SetBookingStatusCommand, SetBookingStatusHandler};
pub use set_schedule::{SetScheduleCommand, SetScheduleHandler};
