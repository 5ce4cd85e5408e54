//! 资源内存存储实现

use crate::error::StorageError;
use crate::traits::ResourceStore;
use domain::Resource;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// 资源内存存储，键为资源名称。
pub struct InMemoryResourceStore {
    resources: RwLock<HashMap<String, Resource>>,
}

impl InMemoryResourceStore {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<Resource>) -> Self {
        let resources = records
            .into_iter()
            .map(|resource| (resource.name.clone(), resource))
            .collect();
        Self {
            resources: RwLock::new(resources),
        }
    }

    pub fn records(&self) -> Result<Vec<Resource>, StorageError> {
        let map = self.resources.read().map_err(|_| StorageError::Lock)?;
        let mut items: Vec<Resource> = map.values().cloned().collect();
        items.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(items)
    }

    pub fn len(&self) -> usize {
        self.resources.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ResourceStore for InMemoryResourceStore {
    async fn find_resource_by_name(&self, name: &str) -> Result<Option<Resource>, StorageError> {
        let map = self.resources.read().map_err(|_| StorageError::Lock)?;
        Ok(map.get(name).cloned())
    }

    async fn upsert_resources(
        &self,
        resources: Vec<Resource>,
    ) -> Result<Vec<Resource>, StorageError> {
        let mut map = self.resources.write().map_err(|_| StorageError::Lock)?;
        let mut stored = Vec::with_capacity(resources.len());
        for mut resource in resources {
            if let Some(existing) = map.get(&resource.name) {
                resource.id = existing.id;
            }
            map.insert(resource.name.clone(), resource.clone());
            stored.push(resource);
        }
        Ok(stored)
    }

    async fn list_resources_in_pool(&self, pool_id: Uuid) -> Result<Vec<Resource>, StorageError> {
        Ok(self
            .records()?
            .into_iter()
            .filter(|resource| resource.in_pool(pool_id))
            .collect())
    }

    async fn delete_resource(&self, id: Uuid) -> Result<bool, StorageError> {
        let mut map = self.resources.write().map_err(|_| StorageError::Lock)?;
        let before = map.len();
        map.retain(|_, resource| resource.id != id);
        Ok(map.len() != before)
    }
}
