use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use shared_database::DatabaseError;
use shared_models::error::AppError;

// ==============================================================================
// REQUEST BODY (POST /visit)
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDetails {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetails {
    pub name: String,
    pub species: String,
    pub breed: String,
    /// `YYYY-MM-DD`, checked during validation.
    pub birth_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDetails {
    pub doctor_id: i64,
    /// ISO 8601 date-time, with or without an offset.
    pub appointment_date: String,
    pub description: String,
    pub service_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRequest {
    pub owner: OwnerDetails,
    pub patient: PatientDetails,
    pub appointment: AppointmentDetails,
}

// ==============================================================================
// VALIDATED RECORDS
// ==============================================================================

/// Owner row to insert when the phone number is not known yet. `phone` keeps
/// the caller's formatting; only lookups use the normalized digits.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOwner {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub doctor_id: i64,
    pub visit_date: NaiveDateTime,
    pub notes: String,
    /// Input order, duplicates kept.
    pub service_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedVisit {
    pub owner: NewOwner,
    pub patient: NewPatient,
    pub appointment: NewAppointment,
}

// ==============================================================================
// REGISTRATION STATE
// ==============================================================================

/// Last step of a registration whose write has been committed. A failure
/// leaves everything up to and including this stage in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStage {
    Start,
    OwnerResolved,
    PatientCreated,
    VisitCreated,
    ServicesAttached,
}

impl fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RegistrationStage::Start => "start",
            RegistrationStage::OwnerResolved => "owner_resolved",
            RegistrationStage::PatientCreated => "patient_created",
            RegistrationStage::VisitCreated => "visit_created",
            RegistrationStage::ServicesAttached => "services_attached",
        };
        f.write_str(name)
    }
}

/// Ids produced by a successful registration. Not part of the HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationReceipt {
    pub owner_id: i64,
    pub owner_created: bool,
    pub patient_id: i64,
    pub visit_id: i64,
    pub services_attached: usize,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database connection error: {0}")]
    Connectivity(String),

    #[error("Unexpected database response: {0}")]
    Store(String),
}

impl From<DatabaseError> for VisitError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Connection(message) => VisitError::Connectivity(message),
            DatabaseError::Auth(message) => {
                VisitError::Connectivity(format!("authentication failed: {}", message))
            }
            DatabaseError::Unavailable { status, message } => {
                VisitError::Connectivity(format!("database returned {}: {}", status, message))
            }
            DatabaseError::Rejected { message, .. } => VisitError::Constraint(message),
            DatabaseError::Decode(message) => VisitError::Store(message),
        }
    }
}

impl From<VisitError> for AppError {
    fn from(err: VisitError) -> Self {
        match err {
            VisitError::Validation(message) => AppError::ValidationError(message),
            VisitError::Constraint(message) => AppError::BadRequest(message),
            VisitError::Connectivity(_) | VisitError::Store(_) => AppError::Database(err.to_string()),
        }
    }
}

/// A failed registration together with the last stage that committed.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct RegistrationFailure {
    pub stage: RegistrationStage,
    #[source]
    pub error: VisitError,
}

impl RegistrationFailure {
    /// True once at least one row has been committed for this request.
    pub fn is_partial(&self) -> bool {
        self.stage != RegistrationStage::Start
    }
}

/// Store trouble before the first commit is a server error. Once a step has
/// committed, every failure is reported to the client with its detail.
impl From<RegistrationFailure> for AppError {
    fn from(failure: RegistrationFailure) -> Self {
        if failure.is_partial() {
            AppError::BadRequest(failure.error.to_string())
        } else {
            failure.error.into()
        }
    }
}
