//! HTTP adapter for vendor availability endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AvailabilityQuery, AvailabilityResponse, SetScheduleRequest};
pub use handlers::AvailabilityHandlers;
pub use routes::availability_routes;
