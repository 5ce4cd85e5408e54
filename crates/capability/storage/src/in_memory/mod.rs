//! 内存存储实现模块
//!
//! 仅用于本地运行和测试。
//!
//! 包含以下实现：
//! - FlowStore: InMemoryFlowStore
//! - VsgStore: InMemoryVsgStore
//! - LevelStore: InMemoryLevelStore
//! - ResourcePoolStore: InMemoryResourcePoolStore
//! - ResourceStore: InMemoryResourceStore
//! - ProfileParameterStore: InMemoryProfileParameterStore

pub mod flow;
pub mod level;
pub mod profile_parameter;
pub mod resource;
pub mod resource_pool;
pub mod vsg;

pub use flow::*;
pub use level::*;
pub use profile_parameter::*;
pub use resource::*;
pub use resource_pool::*;
pub use vsg::*;
