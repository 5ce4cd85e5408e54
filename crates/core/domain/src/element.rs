use serde::{Deserialize, Serialize};
use std::fmt;

/// 元素标识（DMA ID + Element ID）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId {
    pub dma_id: u32,
    pub element_id: u32,
}

impl ElementId {
    pub fn new(dma_id: u32, element_id: u32) -> Self {
        Self { dma_id, element_id }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.dma_id, self.element_id)
    }
}

/// 元素运行状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ElementState {
    #[default]
    Active,
    Paused,
    Stopped,
}

/// 受管元素的基础信息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    pub name: String,
    pub id: ElementId,
    pub protocol_name: String,
    pub protocol_version: String,
    #[serde(default)]
    pub state: ElementState,
}

impl ElementInfo {
    pub fn is_active(&self) -> bool {
        self.state == ElementState::Active
    }

    /// 协议名与版本同时匹配时返回 true。
    pub fn runs_protocol(&self, name: &str, version: &str) -> bool {
        self.protocol_name == name && self.protocol_version == version
    }
}
