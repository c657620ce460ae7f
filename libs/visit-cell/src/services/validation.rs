use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::models::{
    NewAppointment, NewOwner, NewPatient, ValidatedVisit, VisitError, VisitRequest,
};
use crate::services::phone::normalize_phone;

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

const OFFSET_DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
];

// `Z` is matched literally; it carries no shift once the offset is dropped.
const NAIVE_DATE_TIME_FORMATS: [&str; 8] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S%.fZ",
    "%Y-%m-%d %H:%MZ",
];

/// Checks the whole request before anything touches the store and turns it
/// into typed records. Every problem found is reported, joined with `; `.
///
/// Text fields only have to be present, which deserialization already
/// guarantees; blank names, addresses and species are stored as given.
pub fn validate_visit_request(request: VisitRequest) -> Result<ValidatedVisit, VisitError> {
    let VisitRequest { owner, patient, appointment } = request;
    let mut problems = Vec::new();

    if owner.phone.trim().is_empty() {
        problems.push("owner.phone is required".to_string());
    } else if normalize_phone(&owner.phone).is_empty() {
        problems.push(format!("owner.phone '{}' contains no digits", owner.phone));
    }

    let birth_date = parse_birth_date(&patient.birth_date);
    if birth_date.is_none() {
        problems.push(format!(
            "patient.birthDate '{}' does not match YYYY-MM-DD",
            patient.birth_date
        ));
    }

    if appointment.doctor_id < 1 {
        problems.push(format!(
            "appointment.doctorId must be a positive integer, got {}",
            appointment.doctor_id
        ));
    }
    if let Some(bad) = appointment.service_ids.iter().find(|id| **id < 1) {
        problems.push(format!(
            "appointment.serviceIds must contain positive integers, got {}",
            bad
        ));
    }
    let visit_date = parse_appointment_date(&appointment.appointment_date);
    if visit_date.is_none() {
        problems.push(format!(
            "appointment.appointmentDate '{}' is not an ISO 8601 date-time",
            appointment.appointment_date
        ));
    }

    match (birth_date, visit_date) {
        (Some(birth_date), Some(visit_date)) if problems.is_empty() => Ok(ValidatedVisit {
            owner: NewOwner {
                first_name: owner.first_name,
                last_name: owner.last_name,
                phone: owner.phone,
                address: owner.address,
            },
            patient: NewPatient {
                name: patient.name,
                species: patient.species,
                breed: patient.breed,
                birth_date,
            },
            appointment: NewAppointment {
                doctor_id: appointment.doctor_id,
                visit_date,
                notes: appointment.description,
                service_ids: appointment.service_ids,
            },
        }),
        _ => Err(VisitError::Validation(problems.join("; "))),
    }
}

pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT).ok()
}

/// Accepts ISO 8601 date-times with or without seconds and offset, and a bare
/// date as midnight. An offset is dropped without shifting, so the stored
/// value is the wall-clock time the caller wrote.
pub fn parse_appointment_date(value: &str) -> Option<NaiveDateTime> {
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
        return Some(with_offset.naive_local());
    }

    OFFSET_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
        .map(|with_offset| with_offset.naive_local())
        .or_else(|| {
            NAIVE_DATE_TIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
