use serde::{Deserialize, Serialize};

use super::{ADDRESS, Address, Document, GENDER, Gender};
use crate::schema::{DocumentSchema, Field, FieldType};

/// A synthetic patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Individual {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: Gender,
    pub address: Address,
    pub phone: String,
    pub email: String,
    pub ssn: String,
    pub marital_status: MaritalStatus,
    pub preferred_language: String,
    pub emergency_contact: Option<EmergencyContact>,
}

impl Individual {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
}

const EMERGENCY_CONTACT_FIELDS: &[Field] = &[
    Field::new("name", FieldType::String),
    Field::new("relationship", FieldType::String),
    Field::new("phone", FieldType::String),
];

const INDIVIDUAL_FIELDS: &[Field] = &[
    Field::new("id", FieldType::String),
    Field::new("firstName", FieldType::String),
    Field::new("lastName", FieldType::String),
    Field::new("dateOfBirth", FieldType::String),
    Field::new("gender", GENDER),
    Field::new("address", ADDRESS),
    Field::new("phone", FieldType::String),
    Field::new("email", FieldType::String),
    Field::new("ssn", FieldType::String),
    Field::new(
        "maritalStatus",
        FieldType::Enum(&["single", "married", "divorced", "widowed"]),
    ),
    Field::new("preferredLanguage", FieldType::String),
    Field::new(
        "emergencyContact",
        FieldType::Nullable(&FieldType::Object(EMERGENCY_CONTACT_FIELDS)),
    ),
];

impl Document for Individual {
    const NAME: &'static str = "individual";
    const SCHEMA: &'static DocumentSchema = &DocumentSchema::new("individual", INDIVIDUAL_FIELDS);
}
