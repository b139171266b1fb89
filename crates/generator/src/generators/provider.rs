use docsynth_core::{Document, Provider};

use super::{Generator, Prompt};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

const ROLE: &str = "You generate realistic synthetic healthcare provider records. \
NPIs are 10 digits, tax IDs use the NN-NNNNNNN format, and every name, facility \
and phone number must be fictional.";

impl<T: ChatTransport> Generator<T> {
    /// Generate a provider practicing `specialty`, optionally located in `state`.
    pub async fn generate_provider(
        &self,
        specialty: &str,
        state: Option<&str>,
    ) -> Result<Provider, GenerationError> {
        let request = GenerationRequest::new(Provider::NAME)
            .param(specialty)
            .param(state);

        let location = state
            .map(|state| format!(" The facility is in {state}."))
            .unwrap_or_default();
        let user = format!(
            "Create a {specialty} physician and the outpatient facility where they practice.{location}"
        );

        self.produce(request, Prompt::new(ROLE, user), |_| {}).await
    }
}
