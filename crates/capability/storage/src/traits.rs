//! 存储接口 Trait 定义
//!
//! - FlowStore：Flow
//! - VsgStore：虚拟信号组
//! - LevelStore：信号层级
//! - ResourcePoolStore：资源池
//! - ResourceStore：可调度资源
//! - ProfileParameterStore：profile 参数

use crate::error::StorageError;
use async_trait::async_trait;
use domain::{
    Flow, LevelRecord, ProfileParameter, Resource, ResourcePool, Role, VirtualSignalGroup,
};
use uuid::Uuid;

/// Flow 存储接口
#[async_trait]
pub trait FlowStore: Send + Sync {
    async fn find_flow_by_name(&self, name: &str) -> Result<Option<Flow>, StorageError>;

    /// 按名称创建或替换；已存在时沿用旧 id。
    async fn upsert_flow(&self, flow: Flow) -> Result<Flow, StorageError>;

    async fn list_flows(&self) -> Result<Vec<Flow>, StorageError>;
}

/// VSG 存储接口
#[async_trait]
pub trait VsgStore: Send + Sync {
    async fn find_vsg(
        &self,
        name: &str,
        role: Role,
    ) -> Result<Option<VirtualSignalGroup>, StorageError>;

    /// 按（名称, 角色）创建或替换；已存在时沿用旧 id。
    async fn upsert_vsg(&self, vsg: VirtualSignalGroup) -> Result<VirtualSignalGroup, StorageError>;

    async fn list_vsgs(&self) -> Result<Vec<VirtualSignalGroup>, StorageError>;
}

/// 层级存储接口
#[async_trait]
pub trait LevelStore: Send + Sync {
    async fn find_level_by_number(&self, number: i64) -> Result<Option<LevelRecord>, StorageError>;

    async fn create_level(&self, level: LevelRecord) -> Result<LevelRecord, StorageError>;
}

/// 资源池存储接口
#[async_trait]
pub trait ResourcePoolStore: Send + Sync {
    async fn find_pool_by_name(&self, name: &str) -> Result<Option<ResourcePool>, StorageError>;

    async fn create_pool(&self, pool: ResourcePool) -> Result<ResourcePool, StorageError>;
}

/// 资源存储接口
#[async_trait]
pub trait ResourceStore: Send + Sync {
    async fn find_resource_by_name(&self, name: &str) -> Result<Option<Resource>, StorageError>;

    /// 批量按名称创建或替换；已存在时沿用旧 id。
    async fn upsert_resources(&self, resources: Vec<Resource>)
    -> Result<Vec<Resource>, StorageError>;

    async fn list_resources_in_pool(&self, pool_id: Uuid) -> Result<Vec<Resource>, StorageError>;

    async fn delete_resource(&self, id: Uuid) -> Result<bool, StorageError>;
}

/// Profile 参数存储接口
#[async_trait]
pub trait ProfileParameterStore: Send + Sync {
    async fn find_parameter_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProfileParameter>, StorageError>;

    async fn create_parameter(
        &self,
        parameter: ProfileParameter,
    ) -> Result<ProfileParameter, StorageError>;
}
