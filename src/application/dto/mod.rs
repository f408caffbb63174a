/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod orchestration_request;
mod orchestration_response;

pub use orchestration_request::{
    OrchestrationRequest, OrchestrationRequestBuilder, DEFAULT_OUTPUT_DIR,
};
pub use orchestration_response::{OrchestrationResponse, PlannedInstance, RunOutcome};
