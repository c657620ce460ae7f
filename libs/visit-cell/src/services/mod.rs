pub mod phone;
pub mod registrar;
pub mod store;
pub mod validation;

pub use registrar::VisitRegistrar;
pub use store::{SupabaseVisitStore, VisitStore};
