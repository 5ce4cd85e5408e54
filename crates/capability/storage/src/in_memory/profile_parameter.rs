//! Profile 参数内存存储实现

use crate::error::StorageError;
use crate::traits::ProfileParameterStore;
use domain::ProfileParameter;
use std::collections::HashMap;
use std::sync::RwLock;

pub struct InMemoryProfileParameterStore {
    parameters: RwLock<HashMap<String, ProfileParameter>>,
}

impl InMemoryProfileParameterStore {
    pub fn new() -> Self {
        Self::from_records(Vec::new())
    }

    pub fn from_records(records: Vec<ProfileParameter>) -> Self {
        let parameters = records
            .into_iter()
            .map(|parameter| (parameter.name.clone(), parameter))
            .collect();
        Self {
            parameters: RwLock::new(parameters),
        }
    }

    pub fn records(&self) -> Result<Vec<ProfileParameter>, StorageError> {
        let map = self.parameters.read().map_err(|_| StorageError::Lock)?;
        let mut items: Vec<ProfileParameter> = map.values().cloned().collect();
        items.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(items)
    }
}

impl Default for InMemoryProfileParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProfileParameterStore for InMemoryProfileParameterStore {
    async fn find_parameter_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProfileParameter>, StorageError> {
        let map = self.parameters.read().map_err(|_| StorageError::Lock)?;
        Ok(map.get(name).cloned())
    }

    async fn create_parameter(
        &self,
        parameter: ProfileParameter,
    ) -> Result<ProfileParameter, StorageError> {
        let mut map = self.parameters.write().map_err(|_| StorageError::Lock)?;
        if map.contains_key(&parameter.name) {
            return Err(StorageError::Conflict {
                kind: "profile parameter",
                name: parameter.name,
            });
        }
        map.insert(parameter.name.clone(), parameter.clone());
        Ok(parameter)
    }
}
