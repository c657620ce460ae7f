use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{
    supabase::{PREFER_MINIMAL, PREFER_REPRESENTATION},
    DatabaseError, SupabaseClient,
};

use crate::models::{NewAppointment, NewOwner, NewPatient};

/// Writes the registrar needs, one store statement each. Every call commits
/// on its own; nothing spans two calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Id of an owner whose stored phone, reduced to digits, equals `normalized_phone`.
    async fn find_owner_by_phone(&self, normalized_phone: &str) -> Result<Option<i64>, DatabaseError>;

    async fn insert_owner(&self, owner: &NewOwner) -> Result<i64, DatabaseError>;

    async fn insert_patient(&self, patient: &NewPatient, owner_id: i64) -> Result<i64, DatabaseError>;

    async fn insert_visit(&self, patient_id: i64, appointment: &NewAppointment) -> Result<i64, DatabaseError>;

    /// One join row per id, in order, as a single statement.
    async fn insert_visit_services(&self, visit_id: i64, service_ids: &[i64]) -> Result<(), DatabaseError>;
}

/// PostgREST-backed store session, opened per request and dropped with it.
pub struct SupabaseVisitStore {
    supabase: SupabaseClient,
}

impl SupabaseVisitStore {
    pub fn open(config: &AppConfig) -> Result<Self, DatabaseError> {
        Ok(Self {
            supabase: SupabaseClient::connect(config)?,
        })
    }

    async fn insert_returning_id(&self, table: &str, id_column: &str, row: Value) -> Result<i64, DatabaseError> {
        let path = format!("/rest/v1/{}?select={}", table, id_column);

        let inserted: Vec<Value> = self.supabase.request_with_headers(
            Method::POST,
            &path,
            Some(row),
            Some(SupabaseClient::prefer(PREFER_REPRESENTATION)),
        ).await?;

        let id = inserted
            .first()
            .and_then(|row| row[id_column].as_i64())
            .ok_or_else(|| DatabaseError::Decode(format!("insert into {} did not return {}", table, id_column)))?;

        debug!("Inserted {} row with {} {}", table, id_column, id);
        Ok(id)
    }
}

#[async_trait]
impl VisitStore for SupabaseVisitStore {
    async fn find_owner_by_phone(&self, normalized_phone: &str) -> Result<Option<i64>, DatabaseError> {
        let owners: Vec<Value> = self.supabase.request(
            Method::POST,
            "/rest/v1/rpc/find_owner_by_phone?select=OwnerID",
            Some(json!({ "normalized_phone": normalized_phone })),
        ).await?;

        match owners.first() {
            Some(owner) => owner["OwnerID"]
                .as_i64()
                .map(Some)
                .ok_or_else(|| DatabaseError::Decode("owner lookup did not return OwnerID".to_string())),
            None => Ok(None),
        }
    }

    async fn insert_owner(&self, owner: &NewOwner) -> Result<i64, DatabaseError> {
        self.insert_returning_id("Owners", "OwnerID", json!({
            "FirstName": owner.first_name,
            "LastName": owner.last_name,
            "Phone": owner.phone,
            "Address": owner.address
        })).await
    }

    async fn insert_patient(&self, patient: &NewPatient, owner_id: i64) -> Result<i64, DatabaseError> {
        self.insert_returning_id("Patients", "PatientID", json!({
            "Name": patient.name,
            "Species": patient.species,
            "Breed": patient.breed,
            "BirthDate": patient.birth_date,
            "OwnerID": owner_id
        })).await
    }

    async fn insert_visit(&self, patient_id: i64, appointment: &NewAppointment) -> Result<i64, DatabaseError> {
        self.insert_returning_id("Visits", "VisitID", json!({
            "PatientID": patient_id,
            "DoctorID": appointment.doctor_id,
            "VisitDate": appointment.visit_date,
            "Notes": appointment.notes
        })).await
    }

    async fn insert_visit_services(&self, visit_id: i64, service_ids: &[i64]) -> Result<(), DatabaseError> {
        let rows: Vec<Value> = service_ids
            .iter()
            .map(|service_id| json!({ "VisitID": visit_id, "ServiceID": service_id }))
            .collect();

        self.supabase.execute(
            Method::POST,
            "/rest/v1/VisitServices",
            Some(Value::Array(rows)),
            Some(SupabaseClient::prefer(PREFER_MINIMAL)),
        ).await
    }
}
