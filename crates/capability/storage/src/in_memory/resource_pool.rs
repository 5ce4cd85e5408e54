//! 资源池内存存储实现

use crate::error::StorageError;
use crate::traits::ResourcePoolStore;
use domain::ResourcePool;
use std::collections::HashMap;
use std::sync::RwLock;

/// 资源池内存存储，键为池名称。
pub struct InMemoryResourcePoolStore {
    pools: RwLock<HashMap<String, ResourcePool>>,
}

impl InMemoryResourcePoolStore {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<ResourcePool>) -> Self {
        let pools = records
            .into_iter()
            .map(|pool| (pool.name.clone(), pool))
            .collect();
        Self {
            pools: RwLock::new(pools),
        }
    }

    pub fn records(&self) -> Result<Vec<ResourcePool>, StorageError> {
        let map = self.pools.read().map_err(|_| StorageError::Lock)?;
        let mut items: Vec<ResourcePool> = map.values().cloned().collect();
        items.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(items)
    }
}

impl Default for InMemoryResourcePoolStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ResourcePoolStore for InMemoryResourcePoolStore {
    async fn find_pool_by_name(&self, name: &str) -> Result<Option<ResourcePool>, StorageError> {
        let map = self.pools.read().map_err(|_| StorageError::Lock)?;
        Ok(map.get(name).cloned())
    }

    async fn create_pool(&self, pool: ResourcePool) -> Result<ResourcePool, StorageError> {
        let mut map = self.pools.write().map_err(|_| StorageError::Lock)?;
        if map.contains_key(&pool.name) {
            return Err(StorageError::Conflict {
                kind: "resource pool",
                name: pool.name,
            });
        }
        map.insert(pool.name.clone(), pool.clone());
        Ok(pool)
    }
}
