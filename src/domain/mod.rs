//! Domain layer: pure business logic with no I/O.

pub mod checkin;
pub mod contact;
pub mod foundation;
