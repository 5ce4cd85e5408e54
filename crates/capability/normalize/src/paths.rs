//! 通路标签查找表。
//!
//! 两张表均为 Neuron 驱动手工定义的 16 项映射，无法从其他数据推导。

/// IP 视频输出流表“通路选择”离散值 -> 通路标签。
pub const VIDEO_PATH_SELECTIONS: [(&str, &str); 16] = [
    ("675", "A1"),
    ("676", "A2"),
    ("677", "A3"),
    ("678", "A4"),
    ("679", "B1"),
    ("680", "B2"),
    ("681", "B3"),
    ("682", "B4"),
    ("683", "C1"),
    ("684", "C2"),
    ("685", "C3"),
    ("686", "C4"),
    ("687", "D1"),
    ("688", "D2"),
    ("689", "D3"),
    ("690", "D4"),
];

/// IP 音频输出流表索引 -> 通路标签。
pub const AUDIO_INDEX_PATHS: [(&str, &str); 16] = [
    ("1", "A1"),
    ("2", "A2"),
    ("3", "A3"),
    ("4", "A4"),
    ("5", "B1"),
    ("6", "B2"),
    ("7", "B3"),
    ("8", "B4"),
    ("9", "C1"),
    ("10", "C2"),
    ("11", "C3"),
    ("12", "C4"),
    ("13", "D1"),
    ("14", "D2"),
    ("15", "D3"),
    ("16", "D4"),
];

/// 未映射的值返回 None，不做默认。
pub fn video_path_label(discreet: &str) -> Option<&'static str> {
    lookup(&VIDEO_PATH_SELECTIONS, discreet)
}

pub fn audio_path_label(index: &str) -> Option<&'static str> {
    lookup(&AUDIO_INDEX_PATHS, index)
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, label)| *label)
}
