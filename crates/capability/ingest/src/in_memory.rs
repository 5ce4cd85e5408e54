//! 基于 JSON 快照的元素目录与表存储。
//!
//! 仅用于本地运行和测试：快照描述一组元素及其表数据，
//! 列 PID 未显式给出时按 `表 ID + 1 + 列索引` 推算。

use crate::cell::Row;
use crate::filter::ColumnFilter;
use crate::{ElementDirectory, ElementTables, IngestError};
use async_trait::async_trait;
use domain::{ElementId, ElementInfo};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 单张表数据。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub id: u32,
    /// 列 PID（按列索引）；为空时使用默认推算
    #[serde(default)]
    pub columns: Vec<u32>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl TableData {
    pub fn new(id: u32, rows: Vec<Row>) -> Self {
        Self {
            id,
            columns: Vec::new(),
            rows,
        }
    }

    pub fn with_columns(mut self, columns: Vec<u32>) -> Self {
        self.columns = columns;
        self
    }

    /// 列 PID -> 列索引。
    pub fn column_index(&self, pid: u32) -> Option<usize> {
        if self.columns.is_empty() {
            pid.checked_sub(self.id + 1).map(|index| index as usize)
        } else {
            self.columns.iter().position(|column| *column == pid)
        }
    }
}

/// 单个元素快照。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub info: ElementInfo,
    #[serde(default)]
    pub tables: Vec<TableData>,
}

/// 内存元素目录 + 表存储。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryDms {
    elements: Vec<ElementSnapshot>,
}

impl InMemoryDms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, IngestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn add_element(&mut self, info: ElementInfo) {
        self.elements.push(ElementSnapshot {
            info,
            tables: Vec::new(),
        });
    }

    /// 写入（或替换）某元素的一张表。
    pub fn put_table(&mut self, element: ElementId, table: TableData) -> Result<(), IngestError> {
        let snapshot = self
            .elements
            .iter_mut()
            .find(|snapshot| snapshot.info.id == element)
            .ok_or(IngestError::ElementNotFound(element))?;
        snapshot.tables.retain(|existing| existing.id != table.id);
        snapshot.tables.push(table);
        Ok(())
    }

    pub fn remove_element(&mut self, element: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|snapshot| snapshot.info.id != element);
        self.elements.len() != before
    }

    fn table(&self, element: ElementId, table_id: u32) -> Result<&TableData, IngestError> {
        let snapshot = self
            .elements
            .iter()
            .find(|snapshot| snapshot.info.id == element)
            .ok_or(IngestError::ElementNotFound(element))?;
        snapshot
            .tables
            .iter()
            .find(|table| table.id == table_id)
            .ok_or(IngestError::TableNotFound { element, table_id })
    }
}

#[async_trait]
impl ElementDirectory for InMemoryDms {
    async fn list_elements(&self) -> Result<Vec<ElementInfo>, IngestError> {
        Ok(self
            .elements
            .iter()
            .map(|snapshot| snapshot.info.clone())
            .collect())
    }
}

#[async_trait]
impl ElementTables for InMemoryDms {
    async fn get_rows(&self, element: ElementId, table_id: u32) -> Result<Vec<Row>, IngestError> {
        Ok(self.table(element, table_id)?.rows.clone())
    }

    async fn query_rows(
        &self,
        element: ElementId,
        table_id: u32,
        filters: &[ColumnFilter],
    ) -> Result<Vec<Row>, IngestError> {
        let table = self.table(element, table_id)?;
        let mut resolved = Vec::with_capacity(filters.len());
        for filter in filters {
            let index = table
                .column_index(filter.pid)
                .ok_or(IngestError::UnknownColumn {
                    table_id,
                    pid: filter.pid,
                })?;
            resolved.push((index, filter));
        }
        Ok(table
            .rows
            .iter()
            .filter(|row| {
                resolved.iter().all(|(index, filter)| {
                    row.get(*index)
                        .map(|cell| filter.matches(cell))
                        .unwrap_or(false)
                })
            })
            .cloned()
            .collect())
    }
}
