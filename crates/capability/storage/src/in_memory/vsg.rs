//! VSG 内存存储实现

use crate::error::StorageError;
use crate::traits::VsgStore;
use domain::{Role, VirtualSignalGroup};
use std::collections::HashMap;
use std::sync::RwLock;

/// VSG 内存存储，键为（名称, 角色）。
pub struct InMemoryVsgStore {
    groups: RwLock<HashMap<(String, Role), VirtualSignalGroup>>,
}

impl InMemoryVsgStore {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<VirtualSignalGroup>) -> Self {
        let groups = records
            .into_iter()
            .map(|vsg| ((vsg.name.clone(), vsg.role), vsg))
            .collect();
        Self {
            groups: RwLock::new(groups),
        }
    }

    pub fn records(&self) -> Result<Vec<VirtualSignalGroup>, StorageError> {
        let map = self.groups.read().map_err(|_| StorageError::Lock)?;
        let mut items: Vec<VirtualSignalGroup> = map.values().cloned().collect();
        items.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| (left.role as u8).cmp(&(right.role as u8)))
        });
        Ok(items)
    }

    pub fn len(&self) -> usize {
        self.groups.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryVsgStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl VsgStore for InMemoryVsgStore {
    async fn find_vsg(
        &self,
        name: &str,
        role: Role,
    ) -> Result<Option<VirtualSignalGroup>, StorageError> {
        let map = self.groups.read().map_err(|_| StorageError::Lock)?;
        Ok(map.get(&(name.to_string(), role)).cloned())
    }

    async fn upsert_vsg(
        &self,
        mut vsg: VirtualSignalGroup,
    ) -> Result<VirtualSignalGroup, StorageError> {
        let mut map = self.groups.write().map_err(|_| StorageError::Lock)?;
        let key = (vsg.name.clone(), vsg.role);
        if let Some(existing) = map.get(&key) {
            vsg.id = existing.id;
        }
        map.insert(key, vsg.clone());
        Ok(vsg)
    }

    async fn list_vsgs(&self) -> Result<Vec<VirtualSignalGroup>, StorageError> {
        self.records()
    }
}
