mod api;
mod envelope;
mod narrative;
pub mod prompts;
mod provider;

pub use api::LlmApiClient;
pub use envelope::GenerationEnvelope;
pub use narrative::{parse_narrative, NarrativeClient};
pub use provider::{CompletionOptions, LlmBackend, LlmProvider, NarrativeGenerator};
