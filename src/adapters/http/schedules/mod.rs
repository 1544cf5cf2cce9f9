//! HTTP adapter for schedule endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateScheduleRequest, ScheduleResponse};
pub use handlers::ScheduleHandlers;
pub use routes::schedule_routes;
