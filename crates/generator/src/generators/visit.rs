use docsynth_core::{Document, Individual, VisitReport};

use super::{Generator, Prompt, describe_individual};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

const ROLE: &str = "You generate realistic synthetic outpatient visit notes in SOAP form, \
with vital signs in US units (temperature in °F, weight in lb, height in in).";

impl<T: ChatTransport> Generator<T> {
    /// Generate visit `visit_index` (1-based) of `total_visits` with `provider_name`.
    pub async fn generate_visit_report(
        &self,
        individual: &Individual,
        provider_name: &str,
        visit_index: u32,
        total_visits: u32,
    ) -> Result<VisitReport, GenerationError> {
        let request = GenerationRequest::new(VisitReport::NAME)
            .param(individual.id.as_str())
            .param(visit_index)
            .param(provider_name);

        let user = format!(
            "{}\nCreate visit {visit_index} of {total_visits} with {provider_name}. \
Later visits should follow up on earlier complaints and be dated after them.",
            describe_individual(individual)
        );

        self.produce(request, Prompt::new(ROLE, user), |report: &mut VisitReport| {
            report.provider_name = provider_name.to_string();
        })
        .await
    }

    /// Generate `count` visits with `provider_name`, in visit order.
    ///
    /// Failed visits are logged and skipped without aborting the batch.
    pub async fn generate_visit_reports(
        &self,
        individual: &Individual,
        provider_name: &str,
        count: u32,
    ) -> Vec<VisitReport> {
        let mut reports = Vec::with_capacity(count as usize);

        for visit_index in 1..=count {
            match self
                .generate_visit_report(individual, provider_name, visit_index, count)
                .await
            {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::warn!(visit_index = visit_index, error = %e, "Skipping visit report");
                }
            }
        }

        if reports.len() < count as usize {
            tracing::warn!(
                requested = count,
                generated = reports.len(),
                "Visit report batch incomplete"
            );
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ModelInvoker;
    use crate::cache::CacheStore;
    use crate::config::ModelSettings;
    use crate::generators::testing::FixedTransport;
    use docsynth_core::documents::fixtures;
    use serde_json::Value as JsonValue;

    fn model_visit() -> JsonValue {
        let mut body = fixtures::visit_report();
        body["providerName"] = "model chosen".into();
        body
    }

    #[tokio::test]
    async fn batch_produces_requested_count_with_forced_provider() {
        let generator = Generator::new(
            ModelInvoker::new(
                FixedTransport::new(model_visit()),
                ModelSettings::default(),
            ),
            CacheStore::disabled(),
        );
        let patient: Individual = serde_json::from_value(fixtures::individual()).unwrap();

        let visits = generator
            .generate_visit_reports(&patient, "Dr. Alan Reyes", 3)
            .await;
        assert_eq!(visits.len(), 3);
        assert!(visits.iter().all(|v| v.provider_name == "Dr. Alan Reyes"));
        assert_eq!(generator.invoker().transport().calls(), 3);
    }

    #[tokio::test]
    async fn zero_visits_makes_no_calls() {
        let generator = Generator::new(
            ModelInvoker::new(
                FixedTransport::new(model_visit()),
                ModelSettings::default(),
            ),
            CacheStore::disabled(),
        );
        let patient: Individual = serde_json::from_value(fixtures::individual()).unwrap();

        assert!(generator.generate_visit_reports(&patient, "Dr. X", 0).await.is_empty());
        assert_eq!(generator.invoker().transport().calls(), 0);
    }
}
