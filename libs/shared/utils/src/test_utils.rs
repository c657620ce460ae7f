use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Points the store at a mock server (usually `MockServer::uri()`).
    pub fn with_supabase_url(url: impl Into<String>) -> Self {
        Self {
            supabase_url: url.into(),
            ..Self::default()
        }
    }

    /// A store nobody listens on, for connectivity failures.
    pub fn unreachable() -> Self {
        Self::with_supabase_url("http://127.0.0.1:1")
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            api_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            api_port: 8000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn doctor_response(doctor_id: i64, first_name: &str, last_name: &str, specialization: &str) -> Value {
        json!({
            "DoctorID": doctor_id,
            "FirstName": first_name,
            "LastName": last_name,
            "Specialization": specialization
        })
    }

    pub fn service_response(service_id: i64, name: &str, price: f64) -> Value {
        json!({
            "ServiceID": service_id,
            "ServiceName": name,
            "Price": price
        })
    }

    pub fn owner_response(owner_id: i64, phone: &str) -> Value {
        json!({
            "OwnerID": owner_id,
            "FirstName": "Olena",
            "LastName": "Kovalenko",
            "Phone": phone,
            "Address": "12 Khreshchatyk St, Kyiv"
        })
    }

    /// Body PostgREST returns for an insert with `select=<id column>`.
    pub fn inserted_id(column: &str, id: i64) -> Value {
        json!([{ column: id }])
    }

    pub fn foreign_key_violation(table: &str, column: &str, value: i64, referenced: &str) -> Value {
        json!({
            "code": "23503",
            "details": format!("Key ({})=({}) is not present in table \"{}\".", column, value, referenced),
            "hint": null,
            "message": format!(
                "insert or update on table \"{}\" violates foreign key constraint \"{}_{}_fkey\"",
                table, table, column
            )
        })
    }
}
