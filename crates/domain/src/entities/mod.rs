mod trigger;

pub use trigger::{normalize_text, TriggerRecord};
