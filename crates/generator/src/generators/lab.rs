use docsynth_core::{Document, Individual, LabReport};

use super::{Generator, Prompt, describe_individual};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

/// Panels requested when the caller does not name any
pub const DEFAULT_LAB_TESTS: &[&str] = &[
    "Complete Blood Count",
    "Comprehensive Metabolic Panel",
    "Lipid Panel",
    "Hemoglobin A1c",
    "Thyroid Stimulating Hormone",
];

const ROLE: &str = "You generate realistic synthetic clinical laboratory reports. \
Each result carries a numeric value, its unit, the reference range and a flag \
consistent with that range.";

impl<T: ChatTransport> Generator<T> {
    /// Generate one lab report of `test_type` ordered by `ordering_physician`.
    pub async fn generate_lab_report(
        &self,
        individual: &Individual,
        test_type: &str,
        ordering_physician: &str,
    ) -> Result<LabReport, GenerationError> {
        let request = GenerationRequest::new(LabReport::NAME)
            .param(individual.id.as_str())
            .param(test_type)
            .param(ordering_physician);

        let user = format!(
            "{}\nCreate a {test_type} report ordered by {ordering_physician}. \
Include every analyte normally reported for this test.",
            describe_individual(individual)
        );

        self.produce(request, Prompt::new(ROLE, user), |report: &mut LabReport| {
            report.test_type = test_type.to_string();
            report.ordering_physician = ordering_physician.to_string();
        })
        .await
    }

    /// Generate one report per entry of `test_types`, in order.
    ///
    /// Failed items are logged and skipped; the result may be shorter than
    /// `test_types` but never aborts early.
    pub async fn generate_lab_reports(
        &self,
        individual: &Individual,
        test_types: &[&str],
        ordering_physician: &str,
    ) -> Vec<LabReport> {
        let mut reports = Vec::with_capacity(test_types.len());

        for test_type in test_types {
            match self
                .generate_lab_report(individual, test_type, ordering_physician)
                .await
            {
                Ok(report) => reports.push(report),
                Err(e) => {
                    tracing::warn!(test_type = %test_type, error = %e, "Skipping lab report");
                }
            }
        }

        if reports.len() < test_types.len() {
            tracing::warn!(
                requested = test_types.len(),
                generated = reports.len(),
                "Lab report batch incomplete"
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
    use serde_json::json;

    #[tokio::test]
    async fn requested_type_and_physician_win_over_model_output() {
        let mut body = fixtures::lab_report();
        body["testType"] = "Something Else".into();
        body["orderingPhysician"] = "someone else".into();
        body["results"][0]["value"] = json!(13.4);
        let generator = Generator::new(
            ModelInvoker::new(
                FixedTransport::new(body),
                ModelSettings::default(),
            ),
            CacheStore::disabled(),
        );
        let patient: Individual = serde_json::from_value(fixtures::individual()).unwrap();

        let report = generator
            .generate_lab_report(&patient, "Lipid Panel", "Dr. Alan Reyes")
            .await
            .unwrap();
        assert_eq!(report.test_type, "Lipid Panel");
        assert_eq!(report.ordering_physician, "Dr. Alan Reyes");
        assert_eq!(report.results[0].value, "13.4");
    }
}
