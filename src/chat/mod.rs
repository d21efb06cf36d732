pub mod knowledge;
pub mod orchestrator;

pub use orchestrator::{ChatOrchestrator, ChatResponse, HIGH_DEMAND_MESSAGE};
