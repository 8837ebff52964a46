//! Application Layer - Use cases
//!
//! `AnalysisOrchestrator` wires the provider port to the scoring domain.

pub mod orchestrator;

pub use orchestrator::{
    AnalysisOrchestrator, AnalysisStage, AnalyzeError, SetupError, DEFAULT_FETCH_TIMEOUT,
};
