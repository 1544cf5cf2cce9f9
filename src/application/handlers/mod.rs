//! Command and query handlers orchestrating domain logic over the ports.

pub mod checkin;
pub mod contacts;
