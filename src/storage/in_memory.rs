//! In-memory implementation of EntityService for testing and development

use crate::core::entity::Entity;
use crate::core::error::{BackendError, EntityError, RestError, RestResult};
use crate::core::service::{EntityService, field_contains};
use anyhow::anyhow;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const CREATED_ON_FIELD: &str = "createdOn";

/// In-memory entity service
///
/// Records are kept in insertion order. Uses RwLock for thread-safe access.
/// The service can be switched to "unavailable" to simulate a backend outage.
#[derive(Clone)]
pub struct InMemoryEntityService<T: Entity> {
    entities: Arc<RwLock<IndexMap<String, T>>>,
    available: Arc<AtomicBool>,
}

impl<T: Entity> InMemoryEntityService<T> {
    /// Create an empty service
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Create a service pre-filled with `entities`
    pub fn with_entities(entities: impl IntoIterator<Item = T>) -> RestResult<Self> {
        let service = Self::new();
        for entity in entities {
            service.insert(entity)?;
        }
        Ok(service)
    }

    /// Store a record as-is, assigning an id if it has none
    pub fn insert(&self, mut entity: T) -> RestResult<T> {
        let id = match entity.id() {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().simple().to_string();
                entity.set_id(id.clone());
                id
            }
        };

        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
        entities.insert(id, entity.clone());
        Ok(entity)
    }

    /// Simulate the backend going down or coming back
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.entities.read().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_available(&self) -> RestResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BackendError::Unavailable {
                service: T::resource_name().to_string(),
            }
            .into())
        }
    }

    fn not_found(id: &str) -> RestError {
        RestError::not_found(T::resource_name_singular(), id)
    }
}

impl<T: Entity> Default for InMemoryEntityService<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Stamp today's date on a new record whose type has a `createdOn` field
fn stamp_created_on<T: Entity>(entity: &mut T) {
    if !T::has_field(CREATED_ON_FIELD)
        || !entity
            .field_value(CREATED_ON_FIELD)
            .is_some_and(|v| v.is_null())
    {
        return;
    }
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    if let Ok(stamp) = serde_json::from_value::<T>(serde_json::json!({ CREATED_ON_FIELD: today })) {
        entity.merge_from(&stamp);
    }
}

#[async_trait]
impl<T: Entity> EntityService<T> for InMemoryEntityService<T> {
    async fn list(&self) -> RestResult<Vec<T>> {
        self.ensure_available()?;
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> RestResult<T> {
        self.ensure_available()?;
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        entities.get(id).cloned().ok_or_else(|| Self::not_found(id))
    }

    async fn search(&self, field: &str, value: &str) -> RestResult<Vec<T>> {
        self.ensure_available()?;
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities
            .values()
            .filter(|entity| field_contains(*entity, field, value))
            .cloned()
            .collect())
    }

    async fn create(&self, mut entity: T) -> RestResult<T> {
        self.ensure_available()?;
        stamp_created_on(&mut entity);

        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let id = match entity.id() {
            Some(id) if entities.contains_key(id) => {
                return Err(EntityError::AlreadyExists {
                    entity_type: T::resource_name_singular().to_string(),
                    id: id.to_string(),
                }
                .into());
            }
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().simple().to_string();
                entity.set_id(id.clone());
                id
            }
        };
        entities.insert(id, entity.clone());

        Ok(entity)
    }

    async fn update(&self, entity: T) -> RestResult<T> {
        self.ensure_available()?;
        let id = entity
            .id()
            .map(str::to_string)
            .ok_or_else(|| Self::not_found(""))?;

        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let stored = entities.get_mut(&id).ok_or_else(|| Self::not_found(&id))?;
        *stored = entity.clone();

        Ok(entity)
    }

    async fn delete(&self, id: &str) -> RestResult<()> {
        self.ensure_available()?;
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}
