use std::{collections::HashMap, sync::Arc};

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::domain::session_slot::SessionSlot;

/// In-process store of per-browser quiz state. Nothing survives a restart of the server.
pub struct InMemorySessionRepository {
    slots: Arc<RwLock<HashMap<Uuid, SessionSlot>>>,
    ttl: Duration,
}

impl InMemorySessionRepository {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn find(&self, id: &Uuid) -> Option<SessionSlot> {
        let slots = self.slots.read().await;
        slots.get(id).cloned()
    }

    /// Runs `f` against the slot for `id` under the write lock, creating the slot on
    /// first use. Idle slots past their TTL are evicted first.
    pub async fn update<R>(&self, id: Uuid, f: impl FnOnce(&mut SessionSlot) -> R) -> R {
        let mut slots = self.slots.write().await;

        let cutoff = Utc::now() - self.ttl;
        let before = slots.len();
        slots.retain(|key, slot| *key == id || slot.last_active >= cutoff);
        if slots.len() < before {
            log::debug!("Evicted {} idle quiz session(s)", before - slots.len());
        }

        let slot = slots.entry(id).or_default();
        slot.last_active = Utc::now();
        f(slot)
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.slots.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::language::Language;

    #[actix_web::test]
    async fn update_creates_slot_on_first_use() {
        let repo = InMemorySessionRepository::new(Duration::minutes(60));
        let id = Uuid::new_v4();
        assert!(repo.find(&id).await.is_none());

        let generation = repo
            .update(id, |slot| slot.begin_selection(Language::Python))
            .await;

        assert_eq!(generation, Some(1));
        let slot = repo.find(&id).await.unwrap();
        assert_eq!(slot.language, Some(Language::Python));
    }

    #[actix_web::test]
    async fn slots_are_independent() {
        let repo = InMemorySessionRepository::new(Duration::minutes(60));
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        repo.update(first, |slot| slot.begin_selection(Language::Go)).await;
        repo.update(second, |slot| slot.begin_selection(Language::Swift)).await;

        assert_eq!(repo.len().await, 2);
        assert_eq!(repo.find(&first).await.unwrap().language, Some(Language::Go));
        assert_eq!(repo.find(&second).await.unwrap().language, Some(Language::Swift));
    }

    #[actix_web::test]
    async fn idle_slots_are_evicted() {
        let repo = InMemorySessionRepository::new(Duration::minutes(30));
        let stale = Uuid::new_v4();
        repo.update(stale, |slot| slot.last_active = Utc::now() - Duration::hours(2))
            .await;
        // `update` refreshes the timestamp before running the closure, so age it afterwards.
        assert_eq!(repo.len().await, 1);

        let fresh = Uuid::new_v4();
        repo.update(fresh, |_| ()).await;

        assert!(repo.find(&stale).await.is_none());
        assert!(repo.find(&fresh).await.is_some());
    }
}
