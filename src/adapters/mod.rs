//! Adapters - Implementations of the ports for real infrastructure.

pub mod http;
pub mod scheduler;
pub mod storage;
pub mod telephony;
