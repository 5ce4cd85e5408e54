//! Flow 内存存储实现

use crate::error::StorageError;
use crate::traits::FlowStore;
use domain::Flow;
use std::collections::HashMap;
use std::sync::RwLock;

/// Flow 内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储，键为 Flow 名称。
pub struct InMemoryFlowStore {
    flows: RwLock<HashMap<String, Flow>>,
}

impl InMemoryFlowStore {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<Flow>) -> Self {
        let flows = records
            .into_iter()
            .map(|flow| (flow.name.clone(), flow))
            .collect();
        Self {
            flows: RwLock::new(flows),
        }
    }

    /// 按名称排序的全部记录（用于状态快照和测试）
    pub fn records(&self) -> Result<Vec<Flow>, StorageError> {
        let map = self.flows.read().map_err(|_| StorageError::Lock)?;
        let mut items: Vec<Flow> = map.values().cloned().collect();
        items.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(items)
    }

    pub fn len(&self) -> usize {
        self.flows.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryFlowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FlowStore for InMemoryFlowStore {
    async fn find_flow_by_name(&self, name: &str) -> Result<Option<Flow>, StorageError> {
        let map = self.flows.read().map_err(|_| StorageError::Lock)?;
        Ok(map.get(name).cloned())
    }

    async fn upsert_flow(&self, mut flow: Flow) -> Result<Flow, StorageError> {
        let mut map = self.flows.write().map_err(|_| StorageError::Lock)?;
        if let Some(existing) = map.get(&flow.name) {
            flow.id = existing.id;
        }
        map.insert(flow.name.clone(), flow.clone());
        Ok(flow)
    }

    async fn list_flows(&self) -> Result<Vec<Flow>, StorageError> {
        self.records()
    }
}
