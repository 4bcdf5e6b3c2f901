//! Use case for the dark/light mode toggle.

use std::rc::Rc;

use td_core::ports::{DocumentPort, KeyValueStorePort};
use td_core::ThemeMode;
use tracing::{info, warn};

pub struct ToggleTheme {
    storage: Rc<dyn KeyValueStorePort>,
    document: Rc<dyn DocumentPort>,
    key: String,
}

impl ToggleTheme {
    pub fn new(
        storage: Rc<dyn KeyValueStorePort>,
        document: Rc<dyn DocumentPort>,
        key: String,
    ) -> Self {
        Self {
            storage,
            document,
            key,
        }
    }

    /// Flip the mode shown on the page and persist the new one.
    pub async fn execute(&self) -> ThemeMode {
        let current = if self.document.has_body_class(ThemeMode::BODY_CLASS) {
            ThemeMode::DarkOnly
        } else {
            ThemeMode::Light
        };
        let next = current.toggled();
        self.document
            .set_body_class(ThemeMode::BODY_CLASS, next.is_dark());
        if let Err(err) = self.storage.set(&self.key, next.as_str()).await {
            warn!(error = %err, "theme mode not persisted");
        }
        info!(mode = next.as_str(), "theme toggled");
        next
    }

    /// Apply the persisted mode at boot.
    pub async fn apply_stored(&self) -> ThemeMode {
        let stored = match self.storage.get(&self.key).await {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "theme mode unreadable");
                None
            }
        };
        let mode = ThemeMode::from_stored(stored.as_deref());
        self.document.set_body_class(ThemeMode::BODY_CLASS, mode.is_dark());
        mode
    }
}
