//! Draft persistence for the registration wizard.
//!
//! The record lives under one storage key and mirrors the form; the step
//! mirror lives under another and is informational only.

use std::rc::Rc;

use td_core::config::{StorageKeys, WizardConfig};
use td_core::draft::DraftError;
use td_core::ports::{KeyValueStorePort, StorageError, WizardViewPort};
use td_core::{DraftRecord, WizardStep};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum DraftPersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Draft(#[from] DraftError),
}

pub struct DraftPersistence {
    storage: Rc<dyn KeyValueStorePort>,
    view: Rc<dyn WizardViewPort>,
    keys: StorageKeys,
    excluded: Vec<String>,
}

impl DraftPersistence {
    pub fn new(
        storage: Rc<dyn KeyValueStorePort>,
        view: Rc<dyn WizardViewPort>,
        keys: StorageKeys,
        wizard: &WizardConfig,
    ) -> Self {
        Self {
            storage,
            view,
            keys,
            excluded: wizard.draft_excluded_fields.clone(),
        }
    }

    /// Capture the whole form and overwrite the stored record.
    pub async fn save(&self) -> Result<DraftRecord, DraftPersistenceError> {
        let record = DraftRecord::capture(&self.view.form_fields(), &self.excluded);
        self.storage.set(&self.keys.draft, &record.to_json()?).await?;
        debug!(fields = record.len(), "draft saved");
        Ok(record)
    }

    /// Apply the stored record to the fields present on the page. Returns
    /// the number of fields updated. A malformed record is removed.
    pub async fn restore(&self) -> Result<usize, DraftPersistenceError> {
        let Some(record) = self.load().await? else {
            return Ok(0);
        };
        let plan = record.restore_plan(&self.view.form_fields(), &self.excluded);
        for assignment in &plan {
            self.view.apply_field(assignment);
        }
        info!(stored = record.len(), applied = plan.len(), "draft restored");
        Ok(plan.len())
    }

    /// After the wizard markup was replaced: fill the fields the new markup
    /// left blank from the stored record.
    pub async fn refill(&self) -> Result<usize, DraftPersistenceError> {
        let Some(record) = self.load().await? else {
            return Ok(0);
        };
        let plan = record.fill_plan(&self.view.form_fields(), &self.excluded);
        for assignment in &plan {
            self.view.apply_field(assignment);
        }
        debug!(applied = plan.len(), "draft refilled");
        Ok(plan.len())
    }

    async fn load(&self) -> Result<Option<DraftRecord>, DraftPersistenceError> {
        let Some(raw) = self.storage.get(&self.keys.draft).await? else {
            return Ok(None);
        };
        match DraftRecord::from_json(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                warn!(error = %err, "discarding malformed draft");
                self.storage.remove(&self.keys.draft).await?;
                Ok(None)
            }
        }
    }

    pub async fn clear(&self) -> Result<(), DraftPersistenceError> {
        self.storage.remove(&self.keys.draft).await?;
        info!("draft cleared");
        Ok(())
    }

    /// Write the step mirror. Called after every step change.
    pub async fn mirror_step(&self, step: WizardStep) -> Result<(), DraftPersistenceError> {
        self.storage
            .set(&self.keys.current_step, &step.to_string())
            .await?;
        Ok(())
    }

    /// The mirrored step from a previous page load, if any.
    pub async fn restored_step(&self) -> Result<Option<WizardStep>, DraftPersistenceError> {
        let raw = self.storage.get(&self.keys.current_step).await?;
        Ok(raw.as_deref().and_then(WizardStep::parse))
    }
}
