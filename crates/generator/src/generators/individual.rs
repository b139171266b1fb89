use docsynth_core::{Document, Individual};

use super::{Generator, Prompt};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

const ROLE: &str = "You generate realistic synthetic patient demographics for testing \
healthcare software. All people, identifiers and contact details must be fictional. \
Dates use YYYY-MM-DD. Phone numbers use the 555 exchange.";

impl<T: ChatTransport> Generator<T> {
    /// Generate the `ordinal`-th synthetic patient, optionally resident in `state`.
    pub async fn generate_individual(
        &self,
        ordinal: u32,
        state: Option<&str>,
    ) -> Result<Individual, GenerationError> {
        let request = GenerationRequest::new(Individual::NAME)
            .param(ordinal)
            .param(state);

        let location = match state {
            Some(state) => format!("The patient lives in the US state {state}."),
            None => "The patient lives anywhere in the United States.".to_string(),
        };
        let user = format!(
            "Create synthetic patient #{ordinal}. {location} Pick a plausible age between 18 and 90 \
and a varied cultural background. Include an emergency contact about half of the time, otherwise null."
        );

        self.produce(request, Prompt::new(ROLE, user), |_| {}).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ModelInvoker;
    use crate::cache::CacheStore;
    use crate::config::ModelSettings;
    use crate::generators::testing::FixedTransport;
    use docsynth_core::documents::fixtures::individual;

    #[tokio::test]
    async fn prompt_mentions_requested_state() {
        let generator = Generator::new(
            ModelInvoker::new(FixedTransport::new(individual()), ModelSettings::default()),
            CacheStore::disabled(),
        );

        let patient = generator.generate_individual(3, Some("TX")).await.unwrap();
        assert_eq!(patient.last_name, "Lopez");

        let prompt = generator
            .invoker()
            .transport()
            .last_user_prompt
            .lock()
            .unwrap()
            .clone()
            .unwrap();
        assert!(prompt.contains("patient #3"));
        assert!(prompt.contains("state TX"));
    }
}
