use crate::element::ElementId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flow 方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowDirection {
    Rx,
    Tx,
}

/// Flow 传输类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportType {
    Sdi,
    /// ST 2110-20 视频
    St2110_20,
    /// ST 2110-30 音频
    St2110_30,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperationalState {
    #[default]
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdministrativeState {
    #[default]
    Up,
    Down,
}

/// IP 传输参数（仅 IP Flow）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpTransport {
    pub source_ip: String,
    pub destination_ip: String,
    pub destination_port: u16,
}

/// 物理/逻辑信号载体。
///
/// 身份为 `name`：同名 Flow 在多次运行之间保持同一个 `id`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub id: Uuid,
    pub name: String,
    pub direction: FlowDirection,
    pub transport: TransportType,
    pub operational_state: OperationalState,
    pub administrative_state: AdministrativeState,
    pub element: ElementId,
    /// DCF 物理接口 ID（查不到时为空）
    pub interface: Option<String>,
    pub sub_interface: String,
    pub path_order: i64,
    pub ip: Option<IpTransport>,
    /// 反向关联的 VSG
    #[serde(default)]
    pub linked_signal_groups: Vec<Uuid>,
}

impl Flow {
    /// 新建 Flow，状态默认 Up，id 随机生成（持久化前可被已有 id 替换）。
    pub fn new(
        name: impl Into<String>,
        direction: FlowDirection,
        transport: TransportType,
        element: ElementId,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            direction,
            transport,
            operational_state: OperationalState::Up,
            administrative_state: AdministrativeState::Up,
            element,
            interface: None,
            sub_interface: String::new(),
            path_order: 0,
            ip: None,
            linked_signal_groups: Vec::new(),
        }
    }

    /// 将 Flow 关联到指定 VSG（覆盖之前的关联）。
    pub fn link_signal_group(&mut self, vsg_id: Uuid) {
        self.linked_signal_groups = vec![vsg_id];
    }
}
