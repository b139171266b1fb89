use serde::{Deserialize, Serialize};

use super::{Document, NULLABLE_STRING};
use crate::schema::{DocumentSchema, Field, FieldType};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisitReport {
    pub provider_name: String,
    pub note: VisitNote,
    pub vitals: VitalSigns,
}

/// SOAP-style note for a single encounter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VisitNote {
    pub visit_date: String,
    pub chief_complaint: String,
    pub history_of_present_illness: String,
    pub assessment: String,
    pub plan: String,
    pub follow_up: Option<String>,
}

/// Vitals in US units (°F, lb, in)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    /// Systolic/diastolic, e.g. `120/80`
    pub blood_pressure: String,
    pub heart_rate: u32,
    pub respiratory_rate: u32,
    pub temperature: f64,
    pub weight: f64,
    pub height: f64,
    pub oxygen_saturation: u32,
}

const NOTE_FIELDS: &[Field] = &[
    Field::new("visitDate", FieldType::String),
    Field::new("chiefComplaint", FieldType::String),
    Field::new("historyOfPresentIllness", FieldType::String),
    Field::new("assessment", FieldType::String),
    Field::new("plan", FieldType::String),
    Field::new("followUp", NULLABLE_STRING),
];

const VITALS_FIELDS: &[Field] = &[
    Field::new("bloodPressure", FieldType::String),
    Field::new("heartRate", FieldType::U32),
    Field::new("respiratoryRate", FieldType::U32),
    Field::new("temperature", FieldType::Number),
    Field::new("weight", FieldType::Number),
    Field::new("height", FieldType::Number),
    Field::new("oxygenSaturation", FieldType::U32),
];

const VISIT_REPORT_FIELDS: &[Field] = &[
    Field::new("providerName", FieldType::String),
    Field::new("note", FieldType::Object(NOTE_FIELDS)),
    Field::new("vitals", FieldType::Object(VITALS_FIELDS)),
];

impl Document for VisitReport {
    const NAME: &'static str = "visit_report";
    const SCHEMA: &'static DocumentSchema =
        &DocumentSchema::new("visit_report", VISIT_REPORT_FIELDS);
}
