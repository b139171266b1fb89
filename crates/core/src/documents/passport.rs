use serde::{Deserialize, Serialize};

use super::{Document, Gender};
use crate::schema::{DocumentSchema, Field, FieldType};

/// Passport data page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Passport {
    pub passport_number: String,
    /// Document type code, `P` for personal passports
    pub passport_type: String,
    /// ICAO three-letter issuing state
    pub country_code: String,
    pub surname: String,
    pub given_names: String,
    pub nationality: String,
    pub date_of_birth: String,
    pub sex: PassportSex,
    pub place_of_birth: String,
    pub date_of_issue: String,
    pub date_of_expiry: String,
    pub authority: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PassportSex {
    M,
    F,
    X,
}

impl From<Gender> for PassportSex {
    fn from(gender: Gender) -> Self {
        match gender {
            Gender::Male => PassportSex::M,
            Gender::Female => PassportSex::F,
            Gender::Other => PassportSex::X,
        }
    }
}

const PASSPORT_FIELDS: &[Field] = &[
    Field::new("passportNumber", FieldType::String),
    Field::new("passportType", FieldType::String),
    Field::new("countryCode", FieldType::String),
    Field::new("surname", FieldType::String),
    Field::new("givenNames", FieldType::String),
    Field::new("nationality", FieldType::String),
    Field::new("dateOfBirth", FieldType::String),
    Field::new("sex", FieldType::Enum(&["M", "F", "X"])),
    Field::new("placeOfBirth", FieldType::String),
    Field::new("dateOfIssue", FieldType::String),
    Field::new("dateOfExpiry", FieldType::String),
    Field::new("authority", FieldType::String),
];

impl Document for Passport {
    const NAME: &'static str = "passport";
    const SCHEMA: &'static DocumentSchema = &DocumentSchema::new("passport", PASSPORT_FIELDS);
}
