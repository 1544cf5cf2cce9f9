//! Vigia - Automated "are-you-safe" phone check-ins
//!
//! This crate calls a monitored contact, listens for a spoken passphrase,
//! retries on mismatch, and escalates to an emergency contact when
//! verification is never confirmed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
