use docsynth_core::{ComplexityLevel, Document, MedicalHistory};

use super::{Generator, Prompt};
use crate::ai::ChatTransport;
use crate::cache::GenerationRequest;
use crate::error::GenerationError;

const ROLE: &str = "You generate realistic synthetic adult medical histories. \
Medications, allergies, chronic conditions, surgeries and family history must be \
clinically coherent with each other. Conditions carry ICD-10 codes.";

impl<T: ChatTransport> Generator<T> {
    /// Generate a medical history of the given complexity. Cached per
    /// complexity level.
    pub async fn generate_medical_history(
        &self,
        complexity: ComplexityLevel,
    ) -> Result<MedicalHistory, GenerationError> {
        let request = GenerationRequest::new(MedicalHistory::NAME).param(complexity.as_str());

        let guidance = match complexity {
            ComplexityLevel::Low => {
                "A mostly healthy adult: at most one chronic condition, one or two medications, \
few or no allergies or surgeries."
            }
            ComplexityLevel::Medium => {
                "An adult with two or three chronic conditions, three to five medications, \
and some allergy and surgical history."
            }
            ComplexityLevel::High => {
                "An older adult with multiple interacting chronic conditions, six or more \
medications, several allergies and a substantial surgical history."
            }
        };
        let user = format!(
            "Create a {} complexity medical history. {guidance}",
            complexity.as_str()
        );

        self.produce(request, Prompt::new(ROLE, user), |_| {}).await
    }
}
