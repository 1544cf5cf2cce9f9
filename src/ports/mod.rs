//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! - `CallGateway` - voice provider capability (place call, render answers)
//! - `ContactStore` - persistence for the contact directory
//! - `CheckInScheduler` - wall-clock triggers for recurring check-ins

mod call_gateway;
mod contact_store;
mod scheduler;

pub use call_gateway::{
    CallGateway, CallHandle, CallInstruction, GatewayError, PlaceCallRequest, RenderedInstruction,
};
pub use contact_store::{ContactStore, ContactStoreError};
pub use scheduler::{CheckInScheduler, ScheduledAction, SchedulerError};
