use docsynth_core::documents::PassportSex;
use docsynth_core::{Document, Individual, Passport};

use super::{Generator, Prompt, describe_individual};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

const ROLE: &str = "You generate realistic synthetic passport data pages. \
Names are upper case, dates are YYYY-MM-DD, and the expiry is ten years after issue \
for adults. Passport numbers must be fictional.";

impl<T: ChatTransport> Generator<T> {
    /// Generate a passport for `individual`. Holder identity always comes
    /// from the individual.
    pub async fn generate_passport(
        &self,
        individual: &Individual,
    ) -> Result<Passport, GenerationError> {
        let request = GenerationRequest::new(Passport::NAME).param(individual.id.as_str());

        let user = format!(
            "{}\nCreate a valid, unexpired passport for this person.",
            describe_individual(individual)
        );

        self.produce(request, Prompt::new(ROLE, user), |passport: &mut Passport| {
            passport.surname = individual.last_name.to_uppercase();
            passport.given_names = individual.first_name.to_uppercase();
            passport.date_of_birth = individual.date_of_birth.clone();
            passport.sex = PassportSex::from(individual.gender);
        })
        .await
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
    async fn holder_identity_comes_from_individual() {
        let body = json!({
            "passportNumber": "561234987",
            "passportType": "P",
            "countryCode": "USA",
            "surname": "SMITH",
            "givenNames": "JANE",
            "nationality": "UNITED STATES OF AMERICA",
            "dateOfBirth": "1990-01-01",
            "sex": "X",
            "placeOfBirth": "TEXAS, U.S.A.",
            "dateOfIssue": "2019-06-20",
            "dateOfExpiry": "2029-06-19",
            "authority": "United States Department of State"
        });
        let generator = Generator::new(
            ModelInvoker::new(FixedTransport::new(body), ModelSettings::default()),
            CacheStore::disabled(),
        );
        let patient: Individual = serde_json::from_value(fixtures::individual()).unwrap();

        let passport = generator.generate_passport(&patient).await.unwrap();
        assert_eq!(passport.surname, "LOPEZ");
        assert_eq!(passport.given_names, "MARIA");
        assert_eq!(passport.date_of_birth, "1984-03-12");
        assert_eq!(passport.sex, PassportSex::F);
        assert_eq!(passport.passport_number, "561234987");
    }
}
