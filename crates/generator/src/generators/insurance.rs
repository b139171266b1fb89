use docsynth_core::documents::{InsuranceInfo, Relationship};
use docsynth_core::{Document, Individual};

use super::{Generator, Prompt, describe_individual};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

/// Chance that the patient is made the subscriber of their own coverage
pub const SUBSCRIBER_OVERRIDE_PROBABILITY: f64 = 0.7;

const ROLE: &str = "You generate realistic synthetic health insurance coverage for a patient. \
Payers, member IDs and group numbers must be fictional. Copays are decimal dollar amounts.";

impl<T: ChatTransport> Generator<T> {
    /// Generate coverage for `individual`, with a secondary plan when
    /// `include_secondary` is set.
    ///
    /// One draw per call decides whether every subscriber is replaced by
    /// the individual.
    pub async fn generate_insurance(
        &self,
        individual: &Individual,
        include_secondary: bool,
    ) -> Result<InsuranceInfo, GenerationError> {
        let request = GenerationRequest::new(InsuranceInfo::NAME)
            .param(individual.id.as_str())
            .param(include_secondary);

        let secondary = if include_secondary {
            "Include a secondary plan from a different payer."
        } else {
            "Set secondary to null."
        };
        let user = format!(
            "{}\nCreate the patient's health insurance. The subscriber may be the patient or a family member. {secondary}",
            describe_individual(individual)
        );

        self.produce(request, Prompt::new(ROLE, user), |info: &mut InsuranceInfo| {
            if !include_secondary {
                info.secondary = None;
            }
            if self.draw(SUBSCRIBER_OVERRIDE_PROBABILITY) {
                apply_subscriber_override(info, individual);
            }
        })
        .await
    }
}

/// Make `individual` the subscriber of every plan in `info`.
///
/// Name, date of birth, gender, address and phone are copied together;
/// the relationship becomes `self`.
pub fn apply_subscriber_override(info: &mut InsuranceInfo, individual: &Individual) {
    for plan in info.plans_mut() {
        let subscriber = &mut plan.subscriber;
        subscriber.first_name = individual.first_name.clone();
        subscriber.last_name = individual.last_name.clone();
        subscriber.date_of_birth = individual.date_of_birth.clone();
        subscriber.gender = individual.gender;
        subscriber.address = individual.address.clone();
        subscriber.phone = individual.phone.clone();
        plan.relationship_to_subscriber = Relationship::SelfInsured;
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
    use rand::rngs::mock::StepRng;
    use serde_json::json;

    fn individual() -> Individual {
        serde_json::from_value(fixtures::individual()).unwrap()
    }

    /// Plan whose subscriber is the patient's spouse living elsewhere
    fn spouse_plan() -> serde_json::Value {
        let mut plan = fixtures::plan();
        plan["subscriber"]["address"]["city"] = "Dallas".into();
        plan["subscriber"]["address"]["zipCode"] = "75201".into();
        plan["subscriber"]["phone"] = "214-555-0199".into();
        plan["copay"] = json!(25);
        plan
    }

    fn generator(body: serde_json::Value, rng: StepRng) -> Generator<FixedTransport> {
        Generator::new(
            ModelInvoker::new(FixedTransport::new(body), ModelSettings::default()),
            CacheStore::disabled(),
        )
        .with_rng(rng)
    }

    #[tokio::test]
    async fn override_copies_all_subscriber_fields() {
        let body = json!({ "primary": spouse_plan(), "secondary": spouse_plan() });
        let generator = generator(body, StepRng::new(0, 0));
        let patient = individual();

        let info = generator.generate_insurance(&patient, true).await.unwrap();

        for plan in [&info.primary, info.secondary.as_ref().unwrap()] {
            let s = &plan.subscriber;
            assert_eq!(s.first_name, patient.first_name);
            assert_eq!(s.last_name, patient.last_name);
            assert_eq!(s.date_of_birth, patient.date_of_birth);
            assert_eq!(s.gender, patient.gender);
            assert_eq!(s.address, patient.address);
            assert_eq!(s.phone, patient.phone);
            assert_eq!(plan.relationship_to_subscriber, Relationship::SelfInsured);
            // employer is not an identifying field
            assert_eq!(s.employer.as_deref(), Some("Lone Star Logistics"));
        }
        assert_eq!(info.primary.copay, "25");
    }

    #[tokio::test]
    async fn no_override_keeps_model_subscriber() {
        let body = json!({ "primary": spouse_plan(), "secondary": null });
        let generator = generator(body, StepRng::new(u64::MAX, 0));

        let info = generator.generate_insurance(&individual(), false).await.unwrap();

        let s = &info.primary.subscriber;
        assert_eq!(s.first_name, "Luis");
        assert_eq!(s.last_name, "Lopez");
        assert_eq!(s.date_of_birth, "1982-07-01");
        assert_eq!(s.address.city, "Dallas");
        assert_eq!(s.phone, "214-555-0199");
        assert_eq!(info.primary.relationship_to_subscriber, Relationship::Spouse);
    }

    #[tokio::test]
    async fn unrequested_secondary_plan_is_dropped() {
        let body = json!({ "primary": spouse_plan(), "secondary": spouse_plan() });
        let generator = generator(body, StepRng::new(u64::MAX, 0));

        let info = generator.generate_insurance(&individual(), false).await.unwrap();
        assert!(info.secondary.is_none());
    }
}
