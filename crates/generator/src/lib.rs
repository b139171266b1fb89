//! docsynth-generator library crate
//!
//! Synthesizes schema-conformant documents by prompting a chat-completion
//! model, validating its output and caching accepted results.
//! The binary entrypoint is in `main.rs`.

pub mod ai;
pub mod cache;
pub mod config;
pub mod error;
pub mod generators;

pub use ai::{AzureChatClient, ChatTransport, ModelInvoker};
pub use cache::{CacheStore, GenerationRequest};
pub use config::{CacheConfig, Config, ModelEndpoint, ModelSettings};
pub use error::{CacheError, GenerationError, ModelError};
pub use generators::{Generator, PatientRecord, RecordOptions};

/// Build a generator backed by the configured Azure OpenAI deployment.
///
/// Extracted from `main()` so embedding code gets the same wiring.
pub fn build_generator(config: &Config) -> Generator<AzureChatClient> {
    let client = AzureChatClient::new(config.endpoint.clone());
    let invoker = ModelInvoker::new(client, config.model);
    let cache = CacheStore::new(config.cache.clone());
    Generator::new(invoker, cache)
}
