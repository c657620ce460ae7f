use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database authentication error: {0}")]
    Auth(String),

    #[error("{message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("Database unavailable ({status}): {message}")]
    Unavailable { status: u16, message: String },

    #[error("Unexpected database response: {0}")]
    Decode(String),
}
