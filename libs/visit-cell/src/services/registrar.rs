use tracing::{debug, info, warn};

use crate::models::{
    NewOwner, RegistrationFailure, RegistrationReceipt, RegistrationStage, ValidatedVisit, VisitError,
};
use crate::services::phone::normalize_phone;
use crate::services::store::VisitStore;

/// Registers a visit as four sequential steps over one store session:
/// resolve owner, create patient, create visit, attach services.
///
/// Each step is committed before the next starts. A failing step leaves none
/// of its own rows, but earlier steps are not compensated, so an owner or
/// patient may remain without a visit. The returned failure names the last
/// stage that committed.
pub struct VisitRegistrar<S> {
    store: S,
}

impl<S: VisitStore> VisitRegistrar<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn register_visit(&self, visit: ValidatedVisit) -> Result<RegistrationReceipt, RegistrationFailure> {
        let mut stage = RegistrationStage::Start;
        let result = self.run_steps(&visit, &mut stage).await;

        match result {
            Ok(receipt) => {
                info!(
                    "Registered visit {} for patient {} (owner {}, new owner: {}, services: {})",
                    receipt.visit_id, receipt.patient_id, receipt.owner_id,
                    receipt.owner_created, receipt.services_attached
                );
                Ok(receipt)
            }
            Err(error) => {
                warn!("Visit registration failed after stage '{}': {}", stage, error);
                Err(RegistrationFailure { stage, error })
            }
        }
    }

    async fn run_steps(
        &self,
        visit: &ValidatedVisit,
        stage: &mut RegistrationStage,
    ) -> Result<RegistrationReceipt, VisitError> {
        let (owner_id, owner_created) = self.resolve_owner(&visit.owner).await?;
        *stage = RegistrationStage::OwnerResolved;

        let patient_id = self.store.insert_patient(&visit.patient, owner_id).await?;
        *stage = RegistrationStage::PatientCreated;

        let visit_id = self.store.insert_visit(patient_id, &visit.appointment).await?;
        *stage = RegistrationStage::VisitCreated;

        let service_ids = &visit.appointment.service_ids;
        if !service_ids.is_empty() {
            self.store.insert_visit_services(visit_id, service_ids).await?;
        }
        *stage = RegistrationStage::ServicesAttached;

        Ok(RegistrationReceipt {
            owner_id,
            owner_created,
            patient_id,
            visit_id,
            services_attached: service_ids.len(),
        })
    }

    /// Returns the owner id and whether it was created by this call.
    async fn resolve_owner(&self, owner: &NewOwner) -> Result<(i64, bool), VisitError> {
        let normalized = normalize_phone(&owner.phone);

        if let Some(owner_id) = self.store.find_owner_by_phone(&normalized).await? {
            debug!("Phone {} matches existing owner {}", normalized, owner_id);
            return Ok((owner_id, false));
        }

        let owner_id = self.store.insert_owner(owner).await?;
        debug!("Created owner {} for phone {}", owner_id, normalized);
        Ok((owner_id, true))
    }
}
