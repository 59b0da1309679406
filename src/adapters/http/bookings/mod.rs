//! HTTP adapter for booking endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    BookingItemRequest, BookingItemResponse, BookingListResponse, BookingOutcomeResponse,
    BookingResponse, CreateBookingRequest, SetBookingStatusRequest,
};
pub use handlers::BookingHandlers;
pub use routes::booking_routes;
