pub mod orchestrator;
pub mod schedule;
