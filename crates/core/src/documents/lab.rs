use serde::{Deserialize, Serialize};

use super::{Document, NULLABLE_STRING};
use crate::schema::{DocumentSchema, Field, FieldType};

/// One lab panel for one test type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LabReport {
    pub test_type: String,
    pub ordering_physician: String,
    pub specimen_type: String,
    pub collection_date: String,
    pub report_date: String,
    pub results: Vec<LabTestResult>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LabTestResult {
    pub name: String,
    pub value: String,
    pub unit: String,
    pub reference_range: String,
    pub flag: ResultFlag,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResultFlag {
    Normal,
    Low,
    High,
    Critical,
}

const RESULT_FIELDS: &[Field] = &[
    Field::new("name", FieldType::String),
    Field::new("value", FieldType::DecimalString),
    Field::new("unit", FieldType::String),
    Field::new("referenceRange", FieldType::String),
    Field::new(
        "flag",
        FieldType::Enum(&["normal", "low", "high", "critical"]),
    ),
];

const LAB_REPORT_FIELDS: &[Field] = &[
    Field::new("testType", FieldType::String),
    Field::new("orderingPhysician", FieldType::String),
    Field::new("specimenType", FieldType::String),
    Field::new("collectionDate", FieldType::String),
    Field::new("reportDate", FieldType::String),
    Field::new("results", FieldType::Array(&FieldType::Object(RESULT_FIELDS))),
    Field::new("notes", NULLABLE_STRING),
];

impl Document for LabReport {
    const NAME: &'static str = "lab_report";
    const SCHEMA: &'static DocumentSchema = &DocumentSchema::new("lab_report", LAB_REPORT_FIELDS);
}
