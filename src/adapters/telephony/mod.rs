//! Call gateway adapters.

mod mock_call_gateway;
mod plivo;

pub use mock_call_gateway::MockCallGateway;
pub use plivo::{PlivoCallGateway, PlivoConfig};
