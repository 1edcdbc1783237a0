pub mod trigger_repository;

pub use trigger_repository::SqliteTriggerRepository;
