use serde::{Deserialize, Serialize};

use super::{Document, NULLABLE_STRING};
use crate::schema::{DocumentSchema, Field, FieldType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    pub medications: Vec<Medication>,
    pub allergies: Vec<Allergy>,
    pub chronic_conditions: Vec<ChronicCondition>,
    pub surgical_history: Vec<Surgery>,
    pub family_history: Vec<FamilyHistoryEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub prescribed_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Allergy {
    pub allergen: String,
    pub reaction: String,
    pub severity: AllergySeverity,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AllergySeverity {
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChronicCondition {
    pub name: String,
    pub icd10_code: String,
    pub diagnosed_date: String,
    pub status: ConditionStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ConditionStatus {
    Active,
    Controlled,
    Resolved,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Surgery {
    pub procedure: String,
    pub date: String,
    pub hospital: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FamilyHistoryEntry {
    pub relation: String,
    pub condition: String,
}

/// How involved a generated history should be. Part of the cache key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Low,
    Medium,
    High,
}

impl ComplexityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "low",
            ComplexityLevel::Medium => "medium",
            ComplexityLevel::High => "high",
        }
    }
}

const MEDICATION_FIELDS: &[Field] = &[
    Field::new("name", FieldType::String),
    Field::new("dosage", FieldType::String),
    Field::new("frequency", FieldType::String),
    Field::new("prescribedDate", FieldType::String),
];

const ALLERGY_FIELDS: &[Field] = &[
    Field::new("allergen", FieldType::String),
    Field::new("reaction", FieldType::String),
    Field::new("severity", FieldType::Enum(&["mild", "moderate", "severe"])),
];

const CONDITION_FIELDS: &[Field] = &[
    Field::new("name", FieldType::String),
    Field::new("icd10Code", FieldType::String),
    Field::new("diagnosedDate", FieldType::String),
    Field::new(
        "status",
        FieldType::Enum(&["active", "controlled", "resolved"]),
    ),
];

const SURGERY_FIELDS: &[Field] = &[
    Field::new("procedure", FieldType::String),
    Field::new("date", FieldType::String),
    Field::new("hospital", NULLABLE_STRING),
];

const FAMILY_FIELDS: &[Field] = &[
    Field::new("relation", FieldType::String),
    Field::new("condition", FieldType::String),
];

const HISTORY_FIELDS: &[Field] = &[
    Field::new(
        "medications",
        FieldType::Array(&FieldType::Object(MEDICATION_FIELDS)),
    ),
    Field::new(
        "allergies",
        FieldType::Array(&FieldType::Object(ALLERGY_FIELDS)),
    ),
    Field::new(
        "chronicConditions",
        FieldType::Array(&FieldType::Object(CONDITION_FIELDS)),
    ),
    Field::new(
        "surgicalHistory",
        FieldType::Array(&FieldType::Object(SURGERY_FIELDS)),
    ),
    Field::new(
        "familyHistory",
        FieldType::Array(&FieldType::Object(FAMILY_FIELDS)),
    ),
];

impl Document for MedicalHistory {
    const NAME: &'static str = "medical_history";
    const SCHEMA: &'static DocumentSchema =
        &DocumentSchema::new("medical_history", HISTORY_FIELDS);
}
