//! In-memory registry of open mission wizards.
//!
//! Each wizard belongs to the user that opened it. Lookups by anyone else
//! behave as if the wizard did not exist. Closures passed to
//! [`WizardRegistry::with_wizard`] run under the write lock and must not
//! await; handlers that talk to collaborators use
//! `begin_submit`/`finish_submit` around two separate lock scopes.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use playlife_core::types::DbId;
use playlife_core::wizard::MissionWizard;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;

struct WizardEntry {
    owner_id: DbId,
    wizard: MissionWizard,
    last_touched: Instant,
}

pub struct WizardRegistry {
    entries: RwLock<HashMap<Uuid, WizardEntry>>,
    idle_ttl: Duration,
}

impl WizardRegistry {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            idle_ttl,
        }
    }

    /// Register `wizard` for `owner_id` and return its id.
    pub async fn open(&self, owner_id: DbId, wizard: MissionWizard) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.write().await.insert(
            id,
            WizardEntry {
                owner_id,
                wizard,
                last_touched: Instant::now(),
            },
        );
        id
    }

    /// Run `f` against the caller's wizard and mark it as recently used.
    pub async fn with_wizard<R>(
        &self,
        id: Uuid,
        owner_id: DbId,
        f: impl FnOnce(&mut MissionWizard) -> R,
    ) -> Result<R, AppError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(&id)
            .filter(|e| e.owner_id == owner_id)
            .ok_or_else(|| not_found(id))?;
        entry.last_touched = Instant::now();
        Ok(f(&mut entry.wizard))
    }

    /// Drop the caller's wizard.
    pub async fn remove(&self, id: Uuid, owner_id: DbId) -> Result<MissionWizard, AppError> {
        let mut entries = self.entries.write().await;
        match entries.get(&id) {
            Some(entry) if entry.owner_id == owner_id => {}
            _ => return Err(not_found(id)),
        }
        entries
            .remove(&id)
            .map(|e| e.wizard)
            .ok_or_else(|| not_found(id))
    }

    /// Drop every wizard idle for at least the configured lifetime, as of `now`.
    ///
    /// Wizards with a submission in flight are kept.
    pub async fn purge_idle_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, e| {
            e.wizard.is_submitting() || now.saturating_duration_since(e.last_touched) < self.idle_ttl
        });
        before - entries.len()
    }

    pub async fn purge_idle(&self) -> usize {
        self.purge_idle_at(Instant::now()).await
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Mission wizard {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use playlife_core::mission::MissionType;
    use playlife_core::wizard::WizardStep;

    fn registry() -> WizardRegistry {
        WizardRegistry::new(Duration::from_secs(60))
    }

    #[tokio::test]
    async fn owner_can_drive_their_wizard() {
        let registry = registry();
        let id = registry.open(1, MissionWizard::new()).await;

        registry
            .with_wizard(id, 1, |w| w.select_profile(MissionType::Traveler))
            .await
            .unwrap()
            .unwrap();
        let step = registry
            .with_wizard(id, 1, |w| w.next())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(step, WizardStep::Logistics);
    }

    #[tokio::test]
    async fn other_users_see_not_found() {
        let registry = registry();
        let id = registry.open(1, MissionWizard::new()).await;

        let err = registry.with_wizard(id, 2, |w| w.step()).await.unwrap_err();
        assert_matches!(err, AppError::NotFound(_));
        assert_matches!(registry.remove(id, 2).await, Err(AppError::NotFound(_)));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn remove_then_lookup_fails() {
        let registry = registry();
        let id = registry.open(1, MissionWizard::new()).await;

        registry.remove(id, 1).await.unwrap();

        assert!(registry.is_empty().await);
        assert_matches!(
            registry.with_wizard(id, 1, |w| w.step()).await,
            Err(AppError::NotFound(_))
        );
    }

    #[tokio::test]
    async fn purge_drops_only_idle_wizards() {
        let registry = registry();
        registry.open(1, MissionWizard::new()).await;
        registry.open(2, MissionWizard::new()).await;

        assert_eq!(registry.purge_idle_at(Instant::now()).await, 0);
        assert_eq!(registry.len().await, 2);

        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(registry.purge_idle_at(later).await, 2);
        assert!(registry.is_empty().await);
    }
}
