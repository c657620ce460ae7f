use reqwest::Method;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{Doctor, Service};

const DOCTORS_PATH: &str = "/rest/v1/Doctors?select=DoctorID,FirstName,LastName,Specialization";
const SERVICES_PATH: &str = "/rest/v1/Services?select=ServiceID,ServiceName,Price";

/// Read-only lookups over the reference tables. Rows come back unfiltered,
/// unpaginated and in whatever order the store returns them.
pub struct CatalogService {
    supabase: SupabaseClient,
}

impl CatalogService {
    pub fn new(config: &AppConfig) -> Result<Self, DatabaseError> {
        Ok(Self {
            supabase: SupabaseClient::connect(config)?,
        })
    }

    pub async fn list_doctors(&self) -> Result<Vec<Doctor>, DatabaseError> {
        let doctors: Vec<Doctor> = self.supabase.request(Method::GET, DOCTORS_PATH, None).await?;
        debug!("Fetched {} doctors", doctors.len());
        Ok(doctors)
    }

    pub async fn list_services(&self) -> Result<Vec<Service>, DatabaseError> {
        let services: Vec<Service> = self.supabase.request(Method::GET, SERVICES_PATH, None).await?;
        debug!("Fetched {} services", services.len());
        Ok(services)
    }
}
