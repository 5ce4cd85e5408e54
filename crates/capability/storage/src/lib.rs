//! # Neuron Storage 模块
//!
//! 平台对象存储的统一抽象层：Flow、VSG、层级、资源池、资源与 profile 参数。
//!
//! ## 架构
//!
//! 1. **接口抽象层** (`traits.rs`)：每类对象一个异步 Trait
//! 2. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 3. **实现层** (`in_memory/`)：`RwLock<HashMap>` 内存实现，用于本地运行与测试
//! 4. **状态快照** (`state.rs`)：内存存储与 JSON 状态文件互转，
//!    使按名称 upsert 的幂等性可以跨进程观察
//!
//! ## 身份约定
//!
//! - Flow 以名称为身份
//! - VSG 以（名称, 角色）为身份
//! - 资源、资源池、profile 参数以名称为身份
//!
//! upsert 命中已有对象时沿用其 id，不会产生重复对象。

pub mod error;
pub mod in_memory;
pub mod state;
pub mod traits;

pub use error::*;
pub use state::{InMemoryStores, StoreState};
pub use traits::*;

pub use in_memory::{
    InMemoryFlowStore, InMemoryLevelStore, InMemoryProfileParameterStore,
    InMemoryResourcePoolStore, InMemoryResourceStore, InMemoryVsgStore,
};
