//! HTTP adapter for check-in and callback endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AnswerQuery, CallbackForm, CallbackQuery, StartCheckInResponse};
pub use handlers::CheckInHandlers;
pub use routes::checkin_routes;
