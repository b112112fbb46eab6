//! Backend boundary for entity access

use crate::core::entity::Entity;
use crate::core::error::RestResult;
use crate::core::field::FieldValue;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

/// Backend field holding a record's external identifiers
pub const EXTERNAL_IDS_FIELD: &str = "externalIds";

/// External id query: id kind → accepted values
pub type ExternalIdQuery = BTreeMap<String, BTreeSet<String>>;

/// Service trait for reading and writing one entity type on the backend
///
/// Implementations report a missing record as
/// [`EntityError::NotFound`](crate::core::error::EntityError::NotFound) and an
/// unreachable backend as
/// [`BackendError::Unavailable`](crate::core::error::BackendError::Unavailable).
#[async_trait]
pub trait EntityService<T: Entity>: Send + Sync {
    /// List every record visible to the caller
    async fn list(&self) -> RestResult<Vec<T>>;

    /// Get a record by id
    async fn get(&self, id: &str) -> RestResult<T>;

    /// Records whose `field` contains `value` (case-insensitive)
    async fn search(&self, field: &str, value: &str) -> RestResult<Vec<T>>;

    /// Create a record; the backend assigns an id when none is given
    async fn create(&self, entity: T) -> RestResult<T>;

    /// Replace the stored record with the same id
    async fn update(&self, entity: T) -> RestResult<T>;

    /// Remove the record with this id
    async fn delete(&self, id: &str) -> RestResult<()>;

    /// Records carrying at least one of the queried external ids
    async fn search_by_external_ids(&self, query: &ExternalIdQuery) -> RestResult<Vec<T>> {
        let all = self.list().await?;
        Ok(all
            .into_iter()
            .filter(|entity| matches_external_ids(entity, query))
            .collect())
    }
}

/// Check whether `entity` has an external id listed in `query`
pub fn matches_external_ids<T: Entity>(entity: &T, query: &ExternalIdQuery) -> bool {
    let Some(FieldValue::Object(ids)) = entity.field_value(EXTERNAL_IDS_FIELD) else {
        return false;
    };
    query.iter().any(|(kind, values)| {
        ids.get(kind)
            .and_then(|v| v.as_str())
            .is_some_and(|v| values.contains(v))
    })
}

/// Case-insensitive substring match on the string form of a field
pub fn field_contains<T: Entity>(entity: &T, field: &str, value: &str) -> bool {
    let needle = value.to_lowercase();
    entity.field_value(field).is_some_and(|found| match found {
        FieldValue::List(items) => items
            .iter()
            .any(|item| item.sort_key().to_lowercase().contains(&needle)),
        other => other.sort_key().to_lowercase().contains(&needle),
    })
}
