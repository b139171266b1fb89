//! Composite patient record: every document for one synthetic patient.

use docsynth_core::{
    ClaimInfo, ComplexityLevel, Individual, InsuranceInfo, LabReport, MedicalHistory, Passport,
    Provider, VisitReport, W2,
};
use serde::Serialize;

use super::{DEFAULT_LAB_TESTS, Generator};
use crate::ai::ChatTransport;
use crate::error::GenerationError;

/// What to include in a generated record
#[derive(Debug, Clone)]
pub struct RecordOptions {
    pub ordinal: u32,
    pub state: Option<String>,
    pub specialty: String,
    pub include_secondary_insurance: bool,
    pub lab_tests: Vec<String>,
    pub visit_count: u32,
    pub complexity: ComplexityLevel,
    pub w2_tax_year: Option<i32>,
    pub include_passport: bool,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            ordinal: 1,
            state: None,
            specialty: "Family Medicine".to_string(),
            include_secondary_insurance: false,
            lab_tests: DEFAULT_LAB_TESTS.iter().map(|t| t.to_string()).collect(),
            visit_count: 2,
            complexity: ComplexityLevel::Medium,
            w2_tax_year: None,
            include_passport: false,
        }
    }
}

/// All documents generated for one patient, ready for rendering
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    pub individual: Individual,
    pub provider: Provider,
    pub insurance: InsuranceInfo,
    pub claim: ClaimInfo,
    pub lab_reports: Vec<LabReport>,
    pub visit_reports: Vec<VisitReport>,
    pub medical_history: MedicalHistory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w2: Option<W2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport: Option<Passport>,
}

impl<T: ChatTransport> Generator<T> {
    /// Generate a full record sequentially. Any single-document failure
    /// aborts the record; lab and visit batches may come back short.
    pub async fn generate_patient_record(
        &self,
        options: &RecordOptions,
    ) -> Result<PatientRecord, GenerationError> {
        let state = options.state.as_deref();

        let individual = self.generate_individual(options.ordinal, state).await?;
        tracing::info!(individual_id = %individual.id, "Generating patient record");

        let provider = self.generate_provider(&options.specialty, state).await?;
        let insurance = self
            .generate_insurance(&individual, options.include_secondary_insurance)
            .await?;
        let claim = self.generate_claim(&individual, &provider, &insurance).await?;

        let physician = provider.display_name();
        let lab_tests: Vec<&str> = options.lab_tests.iter().map(String::as_str).collect();
        let lab_reports = self
            .generate_lab_reports(&individual, &lab_tests, &physician)
            .await;
        let visit_reports = self
            .generate_visit_reports(&individual, &physician, options.visit_count)
            .await;

        let medical_history = self.generate_medical_history(options.complexity).await?;

        let w2 = match options.w2_tax_year {
            Some(year) => Some(self.generate_w2(&individual, year).await?),
            None => None,
        };
        let passport = if options.include_passport {
            Some(self.generate_passport(&individual).await?)
        } else {
            None
        };

        Ok(PatientRecord {
            individual,
            provider,
            insurance,
            claim,
            lab_reports,
            visit_reports,
            medical_history,
            w2,
            passport,
        })
    }
}
