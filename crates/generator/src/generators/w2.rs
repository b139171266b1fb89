use docsynth_core::{Document, Individual, W2};

use super::{Generator, Prompt, describe_individual};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

const ROLE: &str = "You generate realistic synthetic IRS Form W-2 wage statements. \
Amounts are decimal dollars. Social security and Medicare withholding must match \
the statutory rates for the tax year.";

impl<T: ChatTransport> Generator<T> {
    /// Generate a W-2 for `individual` for `tax_year`. The employee block
    /// always mirrors the individual.
    pub async fn generate_w2(
        &self,
        individual: &Individual,
        tax_year: i32,
    ) -> Result<W2, GenerationError> {
        let request = GenerationRequest::new(W2::NAME)
            .param(individual.id.as_str())
            .param(tax_year);

        let user = format!(
            "{}\nCreate the patient's {tax_year} W-2 from a single employer in their state.",
            describe_individual(individual)
        );

        self.produce(request, Prompt::new(ROLE, user), |w2: &mut W2| {
            w2.tax_year = tax_year;
            w2.employee.first_name = individual.first_name.clone();
            w2.employee.last_name = individual.last_name.clone();
            w2.employee.ssn = individual.ssn.clone();
            w2.employee.address = individual.address.clone();
        })
        .await
    }
}
