//! Typed document entities and their schemas.
//!
//! Each entity derives serde with camelCase field names; its `SCHEMA` lists
//! the same fields so that a tree passing validation always deserializes.

mod claim;
mod history;
mod individual;
mod insurance;
mod lab;
mod passport;
mod provider;
mod visit;
mod w2;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::schema::{DocumentSchema, Field, FieldType};

pub use claim::{ClaimInfo, ClaimStatus, ServiceLine};
pub use history::{
    Allergy, AllergySeverity, ChronicCondition, ComplexityLevel, ConditionStatus,
    FamilyHistoryEntry, MedicalHistory, Medication, Surgery,
};
pub use individual::{EmergencyContact, Individual, MaritalStatus};
pub use insurance::{InsuranceInfo, InsurancePlan, PlanType, Relationship, Subscriber};
pub use lab::{LabReport, LabTestResult, ResultFlag};
pub use passport::{Passport, PassportSex};
pub use provider::{Facility, Provider};
pub use visit::{VisitNote, VisitReport, VitalSigns};
pub use w2::{W2, W2Employee, W2Employer};

/// A document type produced by generation and gated by schema validation
pub trait Document: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Generator name, also the first component of its cache key
    const NAME: &'static str;
    const SCHEMA: &'static DocumentSchema;
}

/// Postal address shared by several documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

pub(crate) const ADDRESS_FIELDS: &[Field] = &[
    Field::new("street", FieldType::String),
    Field::new("city", FieldType::String),
    Field::new("state", FieldType::String),
    Field::new("zipCode", FieldType::String),
    Field::new("country", FieldType::String),
];

pub(crate) const ADDRESS: FieldType = FieldType::Object(ADDRESS_FIELDS);

pub(crate) const GENDER: FieldType = FieldType::Enum(&["male", "female", "other"]);

pub(crate) const NULLABLE_STRING: FieldType = FieldType::Nullable(&FieldType::String);

/// Every document schema, in generation order
pub fn all_schemas() -> [&'static DocumentSchema; 9] {
    [
        Individual::SCHEMA,
        Provider::SCHEMA,
        InsuranceInfo::SCHEMA,
        ClaimInfo::SCHEMA,
        LabReport::SCHEMA,
        VisitReport::SCHEMA,
        MedicalHistory::SCHEMA,
        W2::SCHEMA,
        Passport::SCHEMA,
    ]
}

#[cfg(any(test, feature = "test-util"))]
pub mod fixtures {
    //! Conforming sample trees, one per document type.

    use serde_json::{Value as JsonValue, json};

    pub fn address() -> JsonValue {
        json!({
            "street": "12 Oak Ave",
            "city": "Austin",
            "state": "TX",
            "zipCode": "78701",
            "country": "US"
        })
    }

    pub fn individual() -> JsonValue {
        json!({
            "id": "MRN-1001",
            "firstName": "Maria",
            "lastName": "Lopez",
            "dateOfBirth": "1984-03-12",
            "gender": "female",
            "address": address(),
            "phone": "512-555-0101",
            "email": "maria.lopez@example.com",
            "ssn": "123-45-6789",
            "maritalStatus": "married",
            "preferredLanguage": "Spanish",
            "emergencyContact": {
                "name": "Luis Lopez",
                "relationship": "spouse",
                "phone": "512-555-0102"
            }
        })
    }

    pub fn provider() -> JsonValue {
        json!({
            "npi": "1234567893",
            "firstName": "Alan",
            "lastName": "Reyes",
            "credentials": "MD",
            "specialty": "Internal Medicine",
            "taxId": "74-1234567",
            "facility": {
                "name": "Capitol Clinic",
                "address": address(),
                "phone": "512-555-0200",
                "fax": null
            }
        })
    }

    pub fn subscriber() -> JsonValue {
        json!({
            "firstName": "Luis",
            "lastName": "Lopez",
            "dateOfBirth": "1982-07-01",
            "gender": "male",
            "address": address(),
            "phone": "512-555-0102",
            "employer": "Lone Star Logistics"
        })
    }

    pub fn plan() -> JsonValue {
        json!({
            "payerName": "Blue Horizon Health",
            "payerId": "BHH01",
            "planName": "Horizon PPO Gold",
            "planType": "PPO",
            "memberId": "XJH448812",
            "groupNumber": "GRP-2231",
            "relationshipToSubscriber": "spouse",
            "subscriber": subscriber(),
            "effectiveDate": "2024-01-01",
            "copay": "25.00"
        })
    }

    pub fn insurance() -> JsonValue {
        json!({ "primary": plan(), "secondary": null })
    }

    pub fn claim() -> JsonValue {
        json!({
            "claimNumber": "CLM-88120",
            "patientAccountNumber": "PA-5521",
            "dateOfService": "2024-05-02",
            "placeOfService": "11",
            "diagnosisCodes": ["E11.9", "I10"],
            "serviceLines": [{
                "dateOfService": "2024-05-02",
                "cptCode": "99214",
                "modifier": null,
                "description": "Office visit, established patient",
                "diagnosisPointer": 1,
                "units": 1,
                "charge": "180.00"
            }],
            "totalCharge": "180.00",
            "amountPaid": "0.00",
            "priorAuthorization": null,
            "status": "submitted"
        })
    }

    pub fn lab_report() -> JsonValue {
        json!({
            "testType": "Complete Blood Count",
            "orderingPhysician": "Dr. Alan Reyes",
            "specimenType": "Whole blood",
            "collectionDate": "2024-05-02",
            "reportDate": "2024-05-03",
            "results": [{
                "name": "Hemoglobin",
                "value": "13.4",
                "unit": "g/dL",
                "referenceRange": "12.0-15.5",
                "flag": "normal"
            }],
            "notes": null
        })
    }

    pub fn visit_report() -> JsonValue {
        json!({
            "providerName": "Dr. Alan Reyes",
            "note": {
                "visitDate": "2024-05-02",
                "chiefComplaint": "Fatigue",
                "historyOfPresentIllness": "Two weeks of tiredness.",
                "assessment": "Likely iron deficiency.",
                "plan": "CBC and ferritin.",
                "followUp": "Two weeks"
            },
            "vitals": {
                "bloodPressure": "122/78",
                "heartRate": 72,
                "respiratoryRate": 14,
                "temperature": 98.6,
                "weight": 150.2,
                "height": 64.0,
                "oxygenSaturation": 98
            }
        })
    }

    pub fn medical_history() -> JsonValue {
        json!({
            "medications": [{
                "name": "Metformin",
                "dosage": "500 mg",
                "frequency": "twice daily",
                "prescribedDate": "2021-02-10"
            }],
            "allergies": [{ "allergen": "Penicillin", "reaction": "Hives", "severity": "moderate" }],
            "chronicConditions": [{
                "name": "Type 2 diabetes",
                "icd10Code": "E11.9",
                "diagnosedDate": "2021-02-01",
                "status": "controlled"
            }],
            "surgicalHistory": [{ "procedure": "Appendectomy", "date": "2003-08-14", "hospital": null }],
            "familyHistory": [{ "relation": "mother", "condition": "Hypertension" }]
        })
    }

    pub fn w2() -> JsonValue {
        json!({
            "taxYear": 2023,
            "employee": {
                "firstName": "Maria",
                "lastName": "Lopez",
                "ssn": "123-45-6789",
                "address": address()
            },
            "employer": {
                "name": "Lone Star Logistics",
                "ein": "74-7654321",
                "address": address()
            },
            "wages": "58210.00",
            "federalIncomeTaxWithheld": "6120.00",
            "socialSecurityWages": "58210.00",
            "socialSecurityTaxWithheld": "3609.02",
            "medicareWages": "58210.00",
            "medicareTaxWithheld": "844.05",
            "stateCode": "TX",
            "stateWages": "58210.00",
            "stateIncomeTax": "0.00"
        })
    }

    pub fn passport() -> JsonValue {
        json!({
            "passportNumber": "561234987",
            "passportType": "P",
            "countryCode": "USA",
            "surname": "LOPEZ",
            "givenNames": "MARIA",
            "nationality": "UNITED STATES OF AMERICA",
            "dateOfBirth": "1984-03-12",
            "sex": "F",
            "placeOfBirth": "TEXAS, U.S.A.",
            "dateOfIssue": "2019-06-20",
            "dateOfExpiry": "2029-06-19",
            "authority": "United States Department of State"
        })
    }
}
