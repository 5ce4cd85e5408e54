//! 元素表读取能力。
//!
//! - [`ElementDirectory`]：列出受管元素
//! - [`ElementTables`]：按表 ID 读取行，支持列过滤
//! - [`neuron`]：EVS Neuron 各配置表的常量与具名行结构
//! - [`in_memory`]：基于 JSON 快照的内存实现（本地运行与测试）

pub mod cell;
pub mod filter;
pub mod in_memory;
pub mod neuron;

pub use cell::{CellValue, Row};
pub use filter::{ColumnFilter, ComparisonOperator};
pub use in_memory::{ElementSnapshot, InMemoryDms, TableData};
pub use neuron::{
    DcfInterfaceRow, DcfInterfaces, IpOutputStreamRow, MacSettingsRow, NeuronTableReader, SdiIoRow,
    VideoPathRow,
};

use async_trait::async_trait;
use domain::{ElementId, ElementInfo};

/// 读表错误。
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),
    #[error("table {table_id} not found on element {element}")]
    TableNotFound { element: ElementId, table_id: u32 },
    #[error("table {table_id} has no column with pid {pid}")]
    UnknownColumn { table_id: u32, pid: u32 },
    #[error("table {table_id} row {key}: missing cell {column}")]
    MissingCell {
        table_id: u32,
        key: String,
        column: usize,
    },
    #[error("table {table_id} row {key}: invalid number in column {column}: {value}")]
    InvalidNumber {
        table_id: u32,
        key: String,
        column: usize,
        value: String,
    },
    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 受管元素目录。
#[async_trait]
pub trait ElementDirectory: Send + Sync {
    async fn list_elements(&self) -> Result<Vec<ElementInfo>, IngestError>;
}

/// 元素表访问。
#[async_trait]
pub trait ElementTables: Send + Sync {
    /// 读取整张表（保持行顺序）。
    async fn get_rows(&self, element: ElementId, table_id: u32) -> Result<Vec<Row>, IngestError>;

    /// 读取满足全部过滤条件的行。
    async fn query_rows(
        &self,
        element: ElementId,
        table_id: u32,
        filters: &[ColumnFilter],
    ) -> Result<Vec<Row>, IngestError>;
}
