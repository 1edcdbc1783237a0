pub mod overlap;
pub mod trigger_service;

pub use trigger_service::{EventListUpdate, TriggerService};
