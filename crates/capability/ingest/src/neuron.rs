//! EVS Neuron 配置表。
//!
//! 表 ID、列索引与过滤值均来自 Neuron 驱动的表定义；
//! 原始行在这里转换成具名字段结构，后续构建逻辑不再按下标访问。

use crate::cell::{CellValue, Row};
use crate::filter::ColumnFilter;
use crate::{ElementTables, IngestError};
use domain::ElementId;
use std::sync::Arc;
use tracing::debug;

pub const MAC_SETTINGS_TABLE_ID: u32 = 1000;
pub const MAC_SETTINGS_DCF_GROUP_ID: u32 = 5;

pub const SDI_STATIC_IO_TABLE_ID: u32 = 1700;
pub const SDI_STATIC_IO_DCF_GROUP_ID: u32 = 1;
pub const SDI_STATIC_IO_STATUS_PID: u32 = 1702;
pub const SDI_STATIC_IO_STATUS_OK: i64 = 131;

pub const VIDEO_PATHS_TABLE_ID: u32 = 2300;

pub const SDI_BIDIRECTIONAL_IO_TABLE_ID: u32 = 3100;
pub const SDI_BIDIRECTIONAL_IO_DCF_GROUP_ID: u32 = 2;
pub const SDI_BIDIRECTIONAL_IO_DIRECTION_PID: u32 = 3102;
pub const SDI_BIDIRECTIONAL_IO_DIRECTION_INPUT: i64 = 131;

pub const IP_VIDEO_OUTPUT_STREAMS_TABLE_ID: u32 = 3200;
pub const IP_AUDIO_OUTPUT_STREAMS_TABLE_ID: u32 = 3400;

pub const DCF_INTERFACES_TABLE_ID: u32 = 65049;

mod column {
    pub const KEY: usize = 0;

    pub const MAC_IP_ADDRESS: usize = 2;

    pub const PATH_MAIN_INPUT: usize = 3;
    pub const PATH_BACKUP_INPUT: usize = 4;

    pub const STREAM_PRIMARY_PORT: usize = 5;
    pub const STREAM_PRIMARY_IP: usize = 6;
    pub const STREAM_PATH_SELECTION: usize = 9;
    pub const STREAM_SECONDARY_PORT: usize = 13;
    pub const STREAM_SECONDARY_IP: usize = 14;

    pub const DCF_DYNAMIC_LINK: usize = 5;
}

/// SDI 静态/双向 I/O 表行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdiIoRow {
    pub key: String,
}

/// 视频通路表行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoPathRow {
    pub key: String,
    pub main_input: i32,
    pub backup_input: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacSettingsRow {
    pub key: String,
    pub ip_address: String,
}

/// IP 视频/音频输出流表行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpOutputStreamRow {
    pub key: String,
    pub primary_destination_ip: String,
    pub primary_destination_port: u16,
    pub secondary_destination_ip: String,
    pub secondary_destination_port: u16,
    /// 通路选择离散值（仅视频流表）
    pub path_selection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DcfInterfaceRow {
    pub key: String,
    pub dynamic_link: String,
}

/// DCF 接口表，按 `"{groupId};{key}"` 动态链接查找接口 ID。
#[derive(Debug, Clone, Default)]
pub struct DcfInterfaces {
    rows: Vec<DcfInterfaceRow>,
}

impl DcfInterfaces {
    pub fn new(rows: Vec<DcfInterfaceRow>) -> Self {
        Self { rows }
    }

    pub fn find(&self, group_id: u32, key: &str) -> Option<&str> {
        let link = format!("{};{}", group_id, key);
        self.rows
            .iter()
            .find(|row| row.dynamic_link == link)
            .map(|row| row.key.as_str())
    }
}

/// 某个 Neuron 元素的表读取器。
#[derive(Clone)]
pub struct NeuronTableReader {
    tables: Arc<dyn ElementTables>,
    element: ElementId,
}

impl NeuronTableReader {
    pub fn new(tables: Arc<dyn ElementTables>, element: ElementId) -> Self {
        Self { tables, element }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// 状态为 OK 的 SDI 静态 I/O 行。
    pub async fn sdi_static_io_rows(&self) -> Result<Vec<SdiIoRow>, IngestError> {
        let filter = ColumnFilter::equal(SDI_STATIC_IO_STATUS_PID, SDI_STATIC_IO_STATUS_OK);
        self.sdi_rows(SDI_STATIC_IO_TABLE_ID, filter).await
    }

    /// 方向为输入的 SDI 双向 I/O 行。
    pub async fn sdi_bidirectional_io_rows(&self) -> Result<Vec<SdiIoRow>, IngestError> {
        let filter = ColumnFilter::equal(
            SDI_BIDIRECTIONAL_IO_DIRECTION_PID,
            SDI_BIDIRECTIONAL_IO_DIRECTION_INPUT,
        );
        self.sdi_rows(SDI_BIDIRECTIONAL_IO_TABLE_ID, filter).await
    }

    async fn sdi_rows(
        &self,
        table_id: u32,
        filter: ColumnFilter,
    ) -> Result<Vec<SdiIoRow>, IngestError> {
        let rows = self
            .tables
            .query_rows(self.element, table_id, &[filter])
            .await?;
        debug!(
            target: "neuron.ingest",
            element = %self.element,
            table_id,
            rows = rows.len(),
            "sdi_rows_read"
        );
        rows.iter()
            .map(|row| {
                Ok(SdiIoRow {
                    key: key_of(table_id, row)?,
                })
            })
            .collect()
    }

    pub async fn video_path_rows(&self) -> Result<Vec<VideoPathRow>, IngestError> {
        let rows = self
            .tables
            .get_rows(self.element, VIDEO_PATHS_TABLE_ID)
            .await?;
        rows.iter()
            .map(|row| {
                let key = key_of(VIDEO_PATHS_TABLE_ID, row)?;
                let main_input =
                    number_at(VIDEO_PATHS_TABLE_ID, &key, row, column::PATH_MAIN_INPUT)?;
                let backup_input =
                    number_at(VIDEO_PATHS_TABLE_ID, &key, row, column::PATH_BACKUP_INPUT)?;
                Ok(VideoPathRow {
                    key,
                    main_input,
                    backup_input,
                })
            })
            .collect()
    }

    pub async fn mac_settings_rows(&self) -> Result<Vec<MacSettingsRow>, IngestError> {
        let rows = self
            .tables
            .get_rows(self.element, MAC_SETTINGS_TABLE_ID)
            .await?;
        rows.iter()
            .map(|row| {
                let key = key_of(MAC_SETTINGS_TABLE_ID, row)?;
                let ip_address =
                    text_at(MAC_SETTINGS_TABLE_ID, &key, row, column::MAC_IP_ADDRESS)?;
                Ok(MacSettingsRow { key, ip_address })
            })
            .collect()
    }

    pub async fn ip_video_output_stream_rows(&self) -> Result<Vec<IpOutputStreamRow>, IngestError> {
        self.stream_rows(IP_VIDEO_OUTPUT_STREAMS_TABLE_ID, true).await
    }

    pub async fn ip_audio_output_stream_rows(&self) -> Result<Vec<IpOutputStreamRow>, IngestError> {
        self.stream_rows(IP_AUDIO_OUTPUT_STREAMS_TABLE_ID, false).await
    }

    async fn stream_rows(
        &self,
        table_id: u32,
        with_path_selection: bool,
    ) -> Result<Vec<IpOutputStreamRow>, IngestError> {
        let rows = self.tables.get_rows(self.element, table_id).await?;
        rows.iter()
            .map(|row| {
                let key = key_of(table_id, row)?;
                let path_selection = if with_path_selection {
                    Some(text_at(table_id, &key, row, column::STREAM_PATH_SELECTION)?)
                } else {
                    None
                };
                Ok(IpOutputStreamRow {
                    primary_destination_port: number_at(
                        table_id,
                        &key,
                        row,
                        column::STREAM_PRIMARY_PORT,
                    )?,
                    primary_destination_ip: text_at(
                        table_id,
                        &key,
                        row,
                        column::STREAM_PRIMARY_IP,
                    )?,
                    secondary_destination_port: number_at(
                        table_id,
                        &key,
                        row,
                        column::STREAM_SECONDARY_PORT,
                    )?,
                    secondary_destination_ip: text_at(
                        table_id,
                        &key,
                        row,
                        column::STREAM_SECONDARY_IP,
                    )?,
                    path_selection,
                    key,
                })
            })
            .collect()
    }

    pub async fn dcf_interfaces(&self) -> Result<DcfInterfaces, IngestError> {
        let rows = self
            .tables
            .get_rows(self.element, DCF_INTERFACES_TABLE_ID)
            .await?;
        let rows = rows
            .iter()
            .map(|row| {
                let key = key_of(DCF_INTERFACES_TABLE_ID, row)?;
                let dynamic_link =
                    text_at(DCF_INTERFACES_TABLE_ID, &key, row, column::DCF_DYNAMIC_LINK)?;
                Ok(DcfInterfaceRow { key, dynamic_link })
            })
            .collect::<Result<Vec<_>, IngestError>>()?;
        Ok(DcfInterfaces::new(rows))
    }
}

fn key_of(table_id: u32, row: &Row) -> Result<String, IngestError> {
    row.get(column::KEY)
        .map(CellValue::as_text)
        .ok_or(IngestError::MissingCell {
            table_id,
            key: String::new(),
            column: column::KEY,
        })
}

fn cell_at<'a>(
    table_id: u32,
    key: &str,
    row: &'a Row,
    column: usize,
) -> Result<&'a CellValue, IngestError> {
    row.get(column).ok_or_else(|| IngestError::MissingCell {
        table_id,
        key: key.to_string(),
        column,
    })
}

fn text_at(table_id: u32, key: &str, row: &Row, column: usize) -> Result<String, IngestError> {
    Ok(cell_at(table_id, key, row, column)?.as_text())
}

fn number_at<T: TryFrom<i64>>(
    table_id: u32,
    key: &str,
    row: &Row,
    column: usize,
) -> Result<T, IngestError> {
    let cell = cell_at(table_id, key, row, column)?;
    cell.as_i64()
        .and_then(|value| T::try_from(value).ok())
        .ok_or_else(|| IngestError::InvalidNumber {
            table_id,
            key: key.to_string(),
            column,
            value: cell.as_text(),
        })
}
