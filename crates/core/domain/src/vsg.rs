//! 虚拟信号组（VSG）：把视频与冗余音频 Flow 绑定成一个逻辑源/目的。

use crate::flow::{AdministrativeState, OperationalState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// VSG 角色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Source,
    Destination,
}

/// 信号层级。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Video,
    Audio1,
}

impl Level {
    /// Levels 表中的层级编号。
    pub fn number(self) -> i64 {
        match self {
            Level::Video => 1,
            Level::Audio1 => 2,
        }
    }
}

/// 主/备 Flow 标记：Blue 为主，Red 为备。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowColor {
    Blue,
    Red,
}

/// Levels 表中的一行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    pub id: Uuid,
    pub number: i64,
    pub name: String,
}

/// 某一层级下关联的 Flow（每层最多一个 Blue、一个 Red）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedFlows {
    pub level_id: Uuid,
    pub blue_flow_id: Option<Uuid>,
    pub red_flow_id: Option<Uuid>,
}

/// 虚拟信号组。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualSignalGroup {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub operational_state: OperationalState,
    pub administrative_state: AdministrativeState,
    pub type_id: Uuid,
    pub button_label: String,
    pub areas: Vec<Uuid>,
    pub area_ids: String,
    pub domains: Vec<Uuid>,
    pub domain_ids: String,
    pub linked_flows: Vec<LinkedFlows>,
}

impl VirtualSignalGroup {
    /// 新建 VSG：状态 Up，类型为空，按钮标签与名称一致，无区域/域。
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            button_label: name.clone(),
            name,
            role,
            operational_state: OperationalState::Up,
            administrative_state: AdministrativeState::Up,
            type_id: Uuid::nil(),
            areas: Vec::new(),
            area_ids: String::new(),
            domains: Vec::new(),
            domain_ids: String::new(),
            linked_flows: Vec::new(),
        }
    }

    /// 在指定层级挂载 Flow；同层同色再次挂载时覆盖。
    pub fn link_flow(&mut self, level_id: Uuid, flow_id: Uuid, color: FlowColor) {
        let index = match self
            .linked_flows
            .iter()
            .position(|section| section.level_id == level_id)
        {
            Some(index) => index,
            None => {
                self.linked_flows.push(LinkedFlows {
                    level_id,
                    blue_flow_id: None,
                    red_flow_id: None,
                });
                self.linked_flows.len() - 1
            }
        };
        let section = &mut self.linked_flows[index];
        match color {
            FlowColor::Blue => section.blue_flow_id = Some(flow_id),
            FlowColor::Red => section.red_flow_id = Some(flow_id),
        }
    }

    pub fn section(&self, level_id: Uuid) -> Option<&LinkedFlows> {
        self.linked_flows
            .iter()
            .find(|section| section.level_id == level_id)
    }
}

/// 视频通路与其生成的输入（SDI）/输出（IP）VSG 的关联。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPathData {
    pub index: String,
    pub input_vsg: Option<Uuid>,
    pub output_vsg: Option<Uuid>,
}

impl VideoPathData {
    pub fn has_any_vsg(&self) -> bool {
        self.input_vsg.is_some() || self.output_vsg.is_some()
    }
}
