//! docsynth-core: document types and schema validation
//!
//! This crate defines every document the generator can synthesize, the
//! static schema each one must satisfy, and the validator that turns raw
//! model output into a typed document or a list of field errors.

pub mod documents;
pub mod error;
pub mod outcome;
pub mod schema;
pub mod validation;

pub use documents::{
    Address, ClaimInfo, ComplexityLevel, Document, Gender, Individual, InsuranceInfo, LabReport,
    MedicalHistory, Passport, Provider, VisitReport, W2,
};
pub use error::ValidationError;
pub use outcome::{FieldError, ValidationOutcome, format_errors};
pub use schema::{DocumentSchema, Field, FieldType};
pub use validation::{check, validate};
