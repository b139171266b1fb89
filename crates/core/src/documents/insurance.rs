use serde::{Deserialize, Serialize};

use super::{ADDRESS, Address, Document, GENDER, Gender, NULLABLE_STRING};
use crate::schema::{DocumentSchema, Field, FieldType};

/// Coverage for one individual: a primary plan and an optional secondary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsuranceInfo {
    pub primary: InsurancePlan,
    pub secondary: Option<InsurancePlan>,
}

impl InsuranceInfo {
    /// Every plan present, primary first
    pub fn plans_mut(&mut self) -> impl Iterator<Item = &mut InsurancePlan> {
        std::iter::once(&mut self.primary).chain(self.secondary.as_mut())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePlan {
    pub payer_name: String,
    pub payer_id: String,
    pub plan_name: String,
    pub plan_type: PlanType,
    pub member_id: String,
    pub group_number: String,
    pub relationship_to_subscriber: Relationship,
    pub subscriber: Subscriber,
    pub effective_date: String,
    pub copay: String,
}

/// The policy holder, who may or may not be the patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub address: Address,
    pub phone: String,
    pub employer: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlanType {
    #[serde(rename = "HMO")]
    Hmo,
    #[serde(rename = "PPO")]
    Ppo,
    #[serde(rename = "EPO")]
    Epo,
    #[serde(rename = "POS")]
    Pos,
    Medicare,
    Medicaid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    #[serde(rename = "self")]
    SelfInsured,
    Spouse,
    Child,
    Other,
}

const SUBSCRIBER_FIELDS: &[Field] = &[
    Field::new("firstName", FieldType::String),
    Field::new("lastName", FieldType::String),
    Field::new("dateOfBirth", FieldType::String),
    Field::new("gender", GENDER),
    Field::new("address", ADDRESS),
    Field::new("phone", FieldType::String),
    Field::new("employer", NULLABLE_STRING),
];

const PLAN_FIELDS: &[Field] = &[
    Field::new("payerName", FieldType::String),
    Field::new("payerId", FieldType::String),
    Field::new("planName", FieldType::String),
    Field::new(
        "planType",
        FieldType::Enum(&["HMO", "PPO", "EPO", "POS", "Medicare", "Medicaid"]),
    ),
    Field::new("memberId", FieldType::String),
    Field::new("groupNumber", FieldType::String),
    Field::new(
        "relationshipToSubscriber",
        FieldType::Enum(&["self", "spouse", "child", "other"]),
    ),
    Field::new("subscriber", FieldType::Object(SUBSCRIBER_FIELDS)),
    Field::new("effectiveDate", FieldType::String),
    Field::new("copay", FieldType::DecimalString),
];

const INSURANCE_FIELDS: &[Field] = &[
    Field::new("primary", FieldType::Object(PLAN_FIELDS)),
    Field::new(
        "secondary",
        FieldType::Nullable(&FieldType::Object(PLAN_FIELDS)),
    ),
];

impl Document for InsuranceInfo {
    const NAME: &'static str = "insurance";
    const SCHEMA: &'static DocumentSchema = &DocumentSchema::new("insurance", INSURANCE_FIELDS);
}
