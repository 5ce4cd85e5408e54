//! 资源发布：资源池与能力参数的引导创建、按视频通路构建资源。

use domain::{
    ElementInfo, ParameterCategory, ParameterType, ProfileParameter, Resource, ResourceCapability,
    ResourceMode, ResourcePool, ResourceProperty, VideoPathData,
};
use neuron_storage::{ProfileParameterStore, ResourcePoolStore, StorageError};
use uuid::Uuid;

pub const PATH_PROPERTY: &str = "Path";
pub const INPUT_VSGS_PROPERTY: &str = "input VSGs";
pub const OUTPUT_VSGS_PROPERTY: &str = "output VSGs";

/// 单次运行共享的发布目标。
#[derive(Debug, Clone)]
pub struct PublishTarget {
    pub pool: ResourcePool,
    pub capability: ProfileParameter,
    pub max_concurrency: u32,
}

/// 按名称查找资源池，不存在则创建。
pub async fn ensure_pool(
    store: &dyn ResourcePoolStore,
    name: &str,
) -> Result<ResourcePool, StorageError> {
    if let Some(pool) = store.find_pool_by_name(name).await? {
        return Ok(pool);
    }
    tracing::info!(pool = name, "creating resource pool");
    store
        .create_pool(ResourcePool {
            id: Uuid::new_v4(),
            name: name.to_string(),
        })
        .await
}

/// 按名称查找能力参数（Capability / Text），不存在则创建。
pub async fn ensure_capability_parameter(
    store: &dyn ProfileParameterStore,
    name: &str,
) -> Result<ProfileParameter, StorageError> {
    if let Some(parameter) = store.find_parameter_by_name(name).await? {
        return Ok(parameter);
    }
    tracing::info!(parameter = name, "creating capability parameter");
    store
        .create_parameter(ProfileParameter {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: ParameterCategory::Capability,
            parameter_type: ParameterType::Text,
        })
        .await
}

/// 一条视频通路对应一个资源；id 由存储按名称决定。
pub fn build_resource(
    element: &ElementInfo,
    path: &VideoPathData,
    target: &PublishTarget,
) -> Resource {
    let mode = if path.has_any_vsg() {
        ResourceMode::Available
    } else {
        ResourceMode::Unavailable
    };
    Resource {
        id: Uuid::new_v4(),
        name: resource_name(element, &path.index),
        element: Some(element.id),
        mode,
        max_concurrency: target.max_concurrency,
        pool_ids: vec![target.pool.id],
        properties: vec![
            ResourceProperty::new(PATH_PROPERTY, path.index.clone()),
            ResourceProperty::new(INPUT_VSGS_PROPERTY, join_ids(path.input_vsg)),
            ResourceProperty::new(OUTPUT_VSGS_PROPERTY, join_ids(path.output_vsg)),
        ],
        capabilities: vec![ResourceCapability {
            profile_parameter_id: target.capability.id,
            is_time_dynamic: true,
            value: None,
        }],
    }
}

pub fn resource_name(element: &ElementInfo, path: &str) -> String {
    format!("{} {}", element.name, path)
}

fn join_ids(ids: impl IntoIterator<Item = Uuid>) -> String {
    ids.into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(";")
}
