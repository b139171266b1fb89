//! Document generators.
//!
//! Every generator follows the same path:
//! cache lookup → (miss) prompt → invoke model → validate → reconcile → cache store.
//! Validation failures are terminal for single documents; batch generators
//! drop the failed item and keep going.

mod claim;
mod history;
mod individual;
mod insurance;
mod lab;
mod passport;
mod provider;
mod record;
mod visit;
mod w2;

use std::sync::{Mutex, PoisonError};

use docsynth_core::{Document, Individual, ValidationOutcome, validate};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::ai::{ChatTransport, ModelInvoker, ResponseFormat};
use crate::cache::{CacheStore, GenerationRequest};
use crate::error::GenerationError;

pub use insurance::{SUBSCRIBER_OVERRIDE_PROBABILITY, apply_subscriber_override};
pub use lab::DEFAULT_LAB_TESTS;
pub use record::{PatientRecord, RecordOptions};

/// Shared instruction appended to every system prompt
const JSON_ONLY: &str = "Respond with a single JSON object that matches the provided schema exactly. \
Do not include markdown, commentary, or fields that are not in the schema.";

/// System and user prompt pair for one generation
pub(crate) struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn new(role: &str, user: String) -> Self {
        Self {
            system: format!("{role}\n\n{JSON_ONLY}"),
            user,
        }
    }
}

/// Orchestrates document generation against one model and one cache
pub struct Generator<T> {
    invoker: ModelInvoker<T>,
    cache: CacheStore,
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl<T: ChatTransport> Generator<T> {
    pub fn new(invoker: ModelInvoker<T>, cache: CacheStore) -> Self {
        Self {
            invoker,
            cache,
            rng: Mutex::new(Box::new(StdRng::from_entropy())),
        }
    }

    /// Replace the random source used for consistency draws
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn invoker(&self) -> &ModelInvoker<T> {
        &self.invoker
    }

    /// Bernoulli draw with the given probability of `true`
    pub(crate) fn draw(&self, probability: f64) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_bool(probability)
    }

    /// Run the single-document pipeline for `D`.
    ///
    /// `reconcile` applies consistency rules to the validated document
    /// before it is cached. Cache hits are returned as stored.
    pub(crate) async fn produce<D, F>(
        &self,
        request: GenerationRequest,
        prompt: Prompt,
        reconcile: F,
    ) -> Result<D, GenerationError>
    where
        D: Document,
        F: FnOnce(&mut D),
    {
        let key = request.cache_key();

        if let Some(cached) = self.cache.get::<D>(&key).await {
            metrics::counter!("generation_cache_hits_total", "document" => D::NAME).increment(1);
            tracing::info!(document = D::NAME, cache_key = %key, "Using cached document");
            return Ok(cached);
        }
        metrics::counter!("generation_cache_misses_total", "document" => D::NAME).increment(1);

        tracing::info!(document = D::NAME, cache_key = %key, "Generating document");
        let hint = ResponseFormat::schema_hint(D::NAME, D::SCHEMA.json_schema());
        let raw = self
            .invoker
            .invoke(&prompt.system, &prompt.user, hint)
            .await
            .map_err(|source| {
                metrics::counter!("generation_failures_total", "reason" => "model").increment(1);
                GenerationError::Model {
                    document: D::NAME,
                    source,
                }
            })?;

        let mut document = match validate::<D>(&raw) {
            ValidationOutcome::Success(document) => document,
            ValidationOutcome::Failure(errors) => {
                metrics::counter!("generation_failures_total", "reason" => "validation")
                    .increment(1);
                tracing::warn!(
                    document = D::NAME,
                    error_count = errors.len(),
                    "Generated document failed validation"
                );
                return Err(GenerationError::Validation {
                    document: D::NAME,
                    source: docsynth_core::ValidationError::new(errors),
                });
            }
        };

        reconcile(&mut document);

        if let Err(e) = self.cache.set(&key, &document).await {
            tracing::warn!(document = D::NAME, cache_key = %key, error = %e, "Failed to cache document");
        }

        Ok(document)
    }
}

/// One-paragraph description of a patient for use inside prompts
pub(crate) fn describe_individual(individual: &Individual) -> String {
    format!(
        "Patient {} (id {}), {}, born {}, living in {}, {}.",
        individual.full_name(),
        individual.id,
        individual.gender.as_str(),
        individual.date_of_birth,
        individual.address.city,
        individual.address.state,
    )
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by generator tests.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::Value as JsonValue;

    use crate::ai::{ChatRequest, ChatTransport};
    use crate::error::ModelError;

    /// Transport returning the same body on every call
    pub struct FixedTransport {
        body: JsonValue,
        calls: AtomicUsize,
        pub last_user_prompt: Mutex<Option<String>>,
    }

    impl FixedTransport {
        pub fn new(body: JsonValue) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
                last_user_prompt: Mutex::new(None),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ChatTransport for FixedTransport {
        async fn complete(&self, request: &ChatRequest) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_user_prompt.lock().unwrap() =
                request.messages.last().map(|m| m.content.clone());
            Ok(self.body.to_string())
        }
    }
}
