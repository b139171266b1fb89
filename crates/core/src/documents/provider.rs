use serde::{Deserialize, Serialize};

use super::{ADDRESS, Address, Document, NULLABLE_STRING};
use crate::schema::{DocumentSchema, Field, FieldType};

/// A rendering provider and the facility they practice at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub npi: String,
    pub first_name: String,
    pub last_name: String,
    pub credentials: String,
    pub specialty: String,
    pub tax_id: String,
    pub facility: Facility,
}

impl Provider {
    /// Display name used on reports, e.g. `Dr. Alan Reyes`
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Facility {
    pub name: String,
    pub address: Address,
    pub phone: String,
    pub fax: Option<String>,
}

const FACILITY_FIELDS: &[Field] = &[
    Field::new("name", FieldType::String),
    Field::new("address", ADDRESS),
    Field::new("phone", FieldType::String),
    Field::new("fax", NULLABLE_STRING),
];

const PROVIDER_FIELDS: &[Field] = &[
    Field::new("npi", FieldType::String),
    Field::new("firstName", FieldType::String),
    Field::new("lastName", FieldType::String),
    Field::new("credentials", FieldType::String),
    Field::new("specialty", FieldType::String),
    Field::new("taxId", FieldType::String),
    Field::new("facility", FieldType::Object(FACILITY_FIELDS)),
];

impl Document for Provider {
    const NAME: &'static str = "provider";
    const SCHEMA: &'static DocumentSchema = &DocumentSchema::new("provider", PROVIDER_FIELDS);
}
