use serde::{Deserialize, Serialize};

/// Row of the `Doctors` reference table. Field names on the wire match the
/// column names, which is also what the landing page reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "DoctorID")]
    pub id: i64,
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Specialization")]
    pub specialization: String,
}

/// Row of the `Services` reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "ServiceID")]
    pub id: i64,
    #[serde(rename = "ServiceName")]
    pub name: String,
    #[serde(rename = "Price")]
    pub price: f64,
}
