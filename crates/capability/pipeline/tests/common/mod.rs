#![allow(dead_code)]

use domain::{ElementId, ElementInfo, ElementState};
use neuron_ingest::{CellValue, InMemoryDms, TableData};
use neuron_pipeline::{SyncPipeline, SyncSettings, SyncStores};
use neuron_storage::InMemoryStores;
use std::sync::Arc;

pub const PROTOCOL: &str = "EVS Neuron NAP - CONVERT";

/// 一条视频通路：键、主输入、备输入、视频通路选择值、音频索引。
pub struct PathSpec {
    pub key: &'static str,
    pub main_input: i64,
    pub backup_input: i64,
    pub selection: &'static str,
    pub audio_index: &'static str,
}

pub const A1: PathSpec = PathSpec {
    key: "A1",
    main_input: 529,
    backup_input: 530,
    selection: "675",
    audio_index: "1",
};

pub const A2: PathSpec = PathSpec {
    key: "A2",
    main_input: 0,
    backup_input: 0,
    selection: "676",
    audio_index: "2",
};

/// 视频通路选择指向 A3，通路 Z9 找不到对应的 IP Flow。
pub const Z9: PathSpec = PathSpec {
    key: "Z9",
    main_input: 0,
    backup_input: 0,
    selection: "677",
    audio_index: "3",
};

pub fn element_info(id: ElementId, name: &str, state: ElementState) -> ElementInfo {
    ElementInfo {
        name: name.to_string(),
        id,
        protocol_name: PROTOCOL.to_string(),
        protocol_version: "Production".to_string(),
        state,
    }
}

fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

fn number(value: i64) -> CellValue {
    CellValue::from(value)
}

fn stream_row(key: &str, selection: &str, last_octet: usize) -> Vec<CellValue> {
    let mut row = vec![CellValue::Empty; 15];
    row[0] = text(key);
    row[5] = number(5000);
    row[6] = text(&format!("239.0.0.{last_octet}"));
    row[9] = text(selection);
    row[13] = number(5002);
    row[14] = text(&format!("239.1.0.{last_octet}"));
    row
}

/// 写入一个完整 Neuron 元素的全部配置表。
pub fn add_neuron(dms: &mut InMemoryDms, info: ElementInfo, paths: &[PathSpec], mac_rows: usize) {
    let id = info.id;
    dms.add_element(info);

    let mac = [("1", "10.0.0.1"), ("2", "10.0.1.1")]
        .iter()
        .take(mac_rows)
        .map(|(key, ip)| vec![text(key), CellValue::Empty, text(ip)])
        .collect();
    put(dms, id, TableData::new(1000, mac));

    let mut sdi_static: Vec<Vec<CellValue>> = (1..=4)
        .map(|key| vec![text(&key.to_string()), number(131)])
        .collect();
    sdi_static.push(vec![text("5"), number(132)]);
    put(dms, id, TableData::new(1700, sdi_static));
    put(
        dms,
        id,
        TableData::new(
            3100,
            vec![
                vec![text("5"), number(131)],
                vec![text("6"), number(130)],
            ],
        ),
    );

    let video_paths = paths
        .iter()
        .map(|path| {
            vec![
                text(path.key),
                CellValue::Empty,
                CellValue::Empty,
                number(path.main_input),
                number(path.backup_input),
            ]
        })
        .collect();
    put(dms, id, TableData::new(2300, video_paths));

    let video_streams = paths
        .iter()
        .enumerate()
        .map(|(index, path)| stream_row(&(index + 1).to_string(), path.selection, index + 1))
        .collect();
    put(dms, id, TableData::new(3200, video_streams));

    let audio_streams = paths
        .iter()
        .enumerate()
        .map(|(index, path)| stream_row(path.audio_index, "", index + 101))
        .collect();
    put(dms, id, TableData::new(3400, audio_streams));

    let dcf_row = |key: &str, link: &str| {
        let mut row = vec![CellValue::Empty; 6];
        row[0] = text(key);
        row[5] = text(link);
        row
    };
    put(
        dms,
        id,
        TableData::new(
            65049,
            vec![dcf_row("10", "1;1"), dcf_row("50", "5;1"), dcf_row("51", "5;2")],
        )
        .with_columns(vec![65050, 65051, 65052, 65053, 65054, 65095]),
    );
}

fn put(dms: &mut InMemoryDms, id: ElementId, table: TableData) {
    dms.put_table(id, table).expect("put table");
}

pub fn pipeline(dms: InMemoryDms, stores: &InMemoryStores) -> SyncPipeline {
    let dms = Arc::new(dms);
    SyncPipeline::new(
        dms.clone(),
        dms,
        SyncStores::from(stores),
        SyncSettings::default(),
    )
}
