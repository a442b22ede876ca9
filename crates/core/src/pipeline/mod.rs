//! Pipeline module - end-to-end processing of one source.

mod orchestrator;
mod pipeline_model;


pub use orchestrator::ProcessingOrchestrator;
pub use pipeline_model::ProcessingResult;
