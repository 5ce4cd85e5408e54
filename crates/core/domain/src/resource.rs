//! 资源管理器模型：资源池、可调度资源与能力参数。

use crate::element::ElementId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceMode {
    Available,
    Unavailable,
}

/// 资源池。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProperty {
    pub name: String,
    pub value: String,
}

impl ResourceProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 资源能力（关联到 profile parameter）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCapability {
    pub profile_parameter_id: Uuid,
    pub is_time_dynamic: bool,
    pub value: Option<String>,
}

/// 可调度资源，身份为 `name`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    pub element: Option<ElementId>,
    pub mode: ResourceMode,
    pub max_concurrency: u32,
    pub pool_ids: Vec<Uuid>,
    pub properties: Vec<ResourceProperty>,
    pub capabilities: Vec<ResourceCapability>,
}

impl Resource {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.value.as_str())
    }

    pub fn in_pool(&self, pool_id: Uuid) -> bool {
        self.pool_ids.contains(&pool_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterCategory {
    Capability,
    Capacity,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterType {
    Text,
    Number,
    Discrete,
}

/// Profile 参数（如 "Linked Source" 能力）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileParameter {
    pub id: Uuid,
    pub name: String,
    pub category: ParameterCategory,
    pub parameter_type: ParameterType,
}
