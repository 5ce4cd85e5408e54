//! 内存存储状态快照（JSON 文件）。

use crate::error::StorageError;
use crate::in_memory::{
    InMemoryFlowStore, InMemoryLevelStore, InMemoryProfileParameterStore,
    InMemoryResourcePoolStore, InMemoryResourceStore, InMemoryVsgStore, default_levels,
};
use domain::{Flow, LevelRecord, ProfileParameter, Resource, ResourcePool, VirtualSignalGroup};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// 全部平台对象的可序列化状态。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub flows: Vec<Flow>,
    #[serde(default)]
    pub virtual_signal_groups: Vec<VirtualSignalGroup>,
    #[serde(default)]
    pub levels: Vec<LevelRecord>,
    #[serde(default)]
    pub resource_pools: Vec<ResourcePool>,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub profile_parameters: Vec<ProfileParameter>,
}

impl StoreState {
    /// 空状态，仅预置默认层级。
    pub fn with_default_levels() -> Self {
        Self {
            levels: default_levels(),
            ..Self::default()
        }
    }

    /// 状态文件未记录层级时补齐默认层级。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path)?;
        let mut state: Self = serde_json::from_str(&json)?;
        if state.levels.is_empty() {
            state.levels = default_levels();
        }
        Ok(state)
    }

    /// 文件不存在时返回带默认层级的空状态。
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::with_default_levels())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// 一组内存存储（共享给同步流程使用）。
#[derive(Clone)]
pub struct InMemoryStores {
    pub flows: Arc<InMemoryFlowStore>,
    pub vsgs: Arc<InMemoryVsgStore>,
    pub levels: Arc<InMemoryLevelStore>,
    pub pools: Arc<InMemoryResourcePoolStore>,
    pub resources: Arc<InMemoryResourceStore>,
    pub parameters: Arc<InMemoryProfileParameterStore>,
}

impl InMemoryStores {
    pub fn from_state(state: StoreState) -> Self {
        Self {
            flows: Arc::new(InMemoryFlowStore::from_records(state.flows)),
            vsgs: Arc::new(InMemoryVsgStore::from_records(state.virtual_signal_groups)),
            levels: Arc::new(InMemoryLevelStore::from_records(state.levels)),
            pools: Arc::new(InMemoryResourcePoolStore::from_records(state.resource_pools)),
            resources: Arc::new(InMemoryResourceStore::from_records(state.resources)),
            parameters: Arc::new(InMemoryProfileParameterStore::from_records(
                state.profile_parameters,
            )),
        }
    }

    pub fn to_state(&self) -> Result<StoreState, StorageError> {
        Ok(StoreState {
            flows: self.flows.records()?,
            virtual_signal_groups: self.vsgs.records()?,
            levels: self.levels.records()?,
            resource_pools: self.pools.records()?,
            resources: self.resources.records()?,
            profile_parameters: self.parameters.records()?,
        })
    }
}

impl Default for InMemoryStores {
    fn default() -> Self {
        Self::from_state(StoreState::with_default_levels())
    }
}
