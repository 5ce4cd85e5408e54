//! 信号路由领域模型：元素、Flow、虚拟信号组（VSG）与可调度资源。

pub mod element;
pub mod flow;
pub mod resource;
pub mod vsg;

pub use element::{ElementId, ElementInfo, ElementState};
pub use flow::{
    AdministrativeState, Flow, FlowDirection, IpTransport, OperationalState, TransportType,
};
pub use resource::{
    ParameterCategory, ParameterType, ProfileParameter, Resource, ResourceCapability, ResourceMode,
    ResourcePool, ResourceProperty,
};
pub use vsg::{FlowColor, Level, LevelRecord, LinkedFlows, Role, VideoPathData, VirtualSignalGroup};
