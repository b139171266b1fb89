use docsynth_core::{ClaimInfo, Document, Individual, InsuranceInfo, Provider};

use super::{Generator, Prompt, describe_individual};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

const ROLE: &str = "You generate realistic synthetic professional (CMS-1500 style) medical claims. \
Use valid-looking ICD-10 and CPT codes, decimal dollar amounts, and make totalCharge the sum \
of the service line charges.";

impl<T: ChatTransport> Generator<T> {
    /// Generate a claim for `individual` billed by `provider` to the
    /// primary plan in `insurance`. Cached per individual.
    pub async fn generate_claim(
        &self,
        individual: &Individual,
        provider: &Provider,
        insurance: &InsuranceInfo,
    ) -> Result<ClaimInfo, GenerationError> {
        let request = GenerationRequest::new(ClaimInfo::NAME).param(individual.id.as_str());

        let user = format!(
            "{}\nRendering provider: {}, {} (NPI {}) at {}.\nPrimary payer: {} ({}), member {}.\n\
Create a claim with one to four service lines for a recent office visit.",
            describe_individual(individual),
            provider.display_name(),
            provider.specialty,
            provider.npi,
            provider.facility.name,
            insurance.primary.payer_name,
            insurance.primary.plan_name,
            insurance.primary.member_id,
        );

        self.produce(request, Prompt::new(ROLE, user), |_| {}).await
    }
}
