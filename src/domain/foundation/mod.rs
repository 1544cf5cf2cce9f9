//! Foundation types shared across the domain.

mod errors;
mod phone;
mod state_machine;

pub use errors::ValidationError;
pub use phone::PhoneNumberValidator;
pub use state_machine::StateMachine;
