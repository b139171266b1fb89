use serde::{Deserialize, Serialize};

use super::{Document, NULLABLE_STRING};
use crate::schema::{DocumentSchema, Field, FieldType};

/// A professional claim with its billed service lines
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClaimInfo {
    pub claim_number: String,
    pub patient_account_number: String,
    pub date_of_service: String,
    /// CMS place-of-service code
    pub place_of_service: String,
    /// ICD-10 codes referenced by `ServiceLine::diagnosis_pointer` (1-based)
    pub diagnosis_codes: Vec<String>,
    pub service_lines: Vec<ServiceLine>,
    pub total_charge: String,
    pub amount_paid: String,
    pub prior_authorization: Option<String>,
    pub status: ClaimStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub date_of_service: String,
    pub cpt_code: String,
    pub modifier: Option<String>,
    pub description: String,
    pub diagnosis_pointer: u32,
    pub units: u32,
    pub charge: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Submitted,
    Pending,
    Paid,
    Denied,
}

const SERVICE_LINE_FIELDS: &[Field] = &[
    Field::new("dateOfService", FieldType::String),
    Field::new("cptCode", FieldType::String),
    Field::new("modifier", NULLABLE_STRING),
    Field::new("description", FieldType::String),
    Field::new("diagnosisPointer", FieldType::U32),
    Field::new("units", FieldType::U32),
    Field::new("charge", FieldType::DecimalString),
];

const CLAIM_FIELDS: &[Field] = &[
    Field::new("claimNumber", FieldType::String),
    Field::new("patientAccountNumber", FieldType::String),
    Field::new("dateOfService", FieldType::String),
    Field::new("placeOfService", FieldType::String),
    Field::new("diagnosisCodes", FieldType::Array(&FieldType::String)),
    Field::new(
        "serviceLines",
        FieldType::Array(&FieldType::Object(SERVICE_LINE_FIELDS)),
    ),
    Field::new("totalCharge", FieldType::DecimalString),
    Field::new("amountPaid", FieldType::DecimalString),
    Field::new("priorAuthorization", NULLABLE_STRING),
    Field::new(
        "status",
        FieldType::Enum(&["submitted", "pending", "paid", "denied"]),
    ),
];

impl Document for ClaimInfo {
    const NAME: &'static str = "claim";
    const SCHEMA: &'static DocumentSchema = &DocumentSchema::new("claim", CLAIM_FIELDS);
}
