//! 表行 -> 领域对象的规范化：Flow 构建与 VSG 构建。

pub mod flows;
pub mod paths;
pub mod vsg;

pub use flows::{FlowSet, IpFlowSet, build_ip_flows, build_sdi_flows};
pub use paths::{audio_path_label, video_path_label};
pub use vsg::{VsgBuilder, sdi_flow_key};

use async_trait::async_trait;
use domain::{Level, Role};
use neuron_storage::{LevelStore, VsgStore};
use std::sync::Arc;
use uuid::Uuid;

/// 规范化错误。
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("unknown {table} path selection: {value}")]
    UnknownPathSelection { table: &'static str, value: String },
    #[error("mac settings table needs 2 rows, found {0}")]
    MissingMacSettings(usize),
    #[error("duplicate {kind} flow key: {key}")]
    DuplicateFlowKey { kind: &'static str, key: String },
    #[error("no {kind} flow for key {key}")]
    MissingFlow { kind: &'static str, key: String },
    #[error("catalog error: {0}")]
    Catalog(String),
}

/// VSG 构建所需的平台查询：层级 ID 与已有 VSG 的 ID。
#[async_trait]
pub trait SignalGroupCatalog: Send + Sync {
    async fn level_id(&self, level: Level) -> Result<Option<Uuid>, NormalizeError>;

    async fn existing_vsg_id(&self, name: &str, role: Role)
    -> Result<Option<Uuid>, NormalizeError>;
}

/// 基于 storage 的目录实现。
#[derive(Clone)]
pub struct StorageCatalog {
    levels: Arc<dyn LevelStore>,
    vsgs: Arc<dyn VsgStore>,
}

impl StorageCatalog {
    pub fn new(levels: Arc<dyn LevelStore>, vsgs: Arc<dyn VsgStore>) -> Self {
        Self { levels, vsgs }
    }
}

#[async_trait]
impl SignalGroupCatalog for StorageCatalog {
    async fn level_id(&self, level: Level) -> Result<Option<Uuid>, NormalizeError> {
        let record = self
            .levels
            .find_level_by_number(level.number())
            .await
            .map_err(|err| NormalizeError::Catalog(err.to_string()))?;
        Ok(record.map(|record| record.id))
    }

    async fn existing_vsg_id(
        &self,
        name: &str,
        role: Role,
    ) -> Result<Option<Uuid>, NormalizeError> {
        let record = self
            .vsgs
            .find_vsg(name, role)
            .await
            .map_err(|err| NormalizeError::Catalog(err.to_string()))?;
        Ok(record.map(|record| record.id))
    }
}
