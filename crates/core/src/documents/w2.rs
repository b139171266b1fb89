use serde::{Deserialize, Serialize};

use super::{ADDRESS, Address, Document};
use crate::schema::{DocumentSchema, Field, FieldType};

/// Wage and Tax Statement. Amounts are decimal text in US dollars.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct W2 {
    pub tax_year: i32,
    pub employee: W2Employee,
    pub employer: W2Employer,
    pub wages: String,
    pub federal_income_tax_withheld: String,
    pub social_security_wages: String,
    pub social_security_tax_withheld: String,
    pub medicare_wages: String,
    pub medicare_tax_withheld: String,
    pub state_code: String,
    pub state_wages: String,
    pub state_income_tax: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct W2Employee {
    pub first_name: String,
    pub last_name: String,
    pub ssn: String,
    pub address: Address,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct W2Employer {
    pub name: String,
    pub ein: String,
    pub address: Address,
}

const EMPLOYEE_FIELDS: &[Field] = &[
    Field::new("firstName", FieldType::String),
    Field::new("lastName", FieldType::String),
    Field::new("ssn", FieldType::String),
    Field::new("address", ADDRESS),
];

const EMPLOYER_FIELDS: &[Field] = &[
    Field::new("name", FieldType::String),
    Field::new("ein", FieldType::String),
    Field::new("address", ADDRESS),
];

const W2_FIELDS: &[Field] = &[
    Field::new("taxYear", FieldType::I32),
    Field::new("employee", FieldType::Object(EMPLOYEE_FIELDS)),
    Field::new("employer", FieldType::Object(EMPLOYER_FIELDS)),
    Field::new("wages", FieldType::DecimalString),
    Field::new("federalIncomeTaxWithheld", FieldType::DecimalString),
    Field::new("socialSecurityWages", FieldType::DecimalString),
    Field::new("socialSecurityTaxWithheld", FieldType::DecimalString),
    Field::new("medicareWages", FieldType::DecimalString),
    Field::new("medicareTaxWithheld", FieldType::DecimalString),
    Field::new("stateCode", FieldType::String),
    Field::new("stateWages", FieldType::DecimalString),
    Field::new("stateIncomeTax", FieldType::DecimalString),
];

impl Document for W2 {
    const NAME: &'static str = "w2";
    const SCHEMA: &'static DocumentSchema = &DocumentSchema::new("w2", W2_FIELDS);
}
