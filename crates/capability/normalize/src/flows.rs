//! Flow 构建：SDI 输入 Flow 与 IP 输出 Flow（主/备）。

use crate::NormalizeError;
use crate::paths::{audio_path_label, video_path_label};
use domain::{ElementInfo, Flow, FlowDirection, IpTransport, TransportType};
use neuron_ingest::neuron::{
    DcfInterfaces, IpOutputStreamRow, MAC_SETTINGS_DCF_GROUP_ID, MacSettingsRow,
    SDI_BIDIRECTIONAL_IO_DCF_GROUP_ID, SDI_STATIC_IO_DCF_GROUP_ID, SdiIoRow,
};
use std::collections::HashMap;

/// 按键索引、保持插入顺序的 Flow 集合。
#[derive(Debug, Clone, Default)]
pub struct FlowSet {
    flows: Vec<Flow>,
    index: HashMap<String, usize>,
}

impl FlowSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 键已存在时保留先插入的 Flow，返回 false。
    pub fn insert_if_absent(&mut self, key: impl Into<String>, flow: Flow) -> bool {
        let key = key.into();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.flows.len());
        self.flows.push(flow);
        true
    }

    pub fn insert(
        &mut self,
        kind: &'static str,
        key: impl Into<String>,
        flow: Flow,
    ) -> Result<(), NormalizeError> {
        let key = key.into();
        if self.index.contains_key(&key) {
            return Err(NormalizeError::DuplicateFlowKey { kind, key });
        }
        self.index.insert(key, self.flows.len());
        self.flows.push(flow);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Flow> {
        self.index.get(key).map(|&position| &self.flows[position])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Flow> {
        self.index.get(key).map(|&position| &mut self.flows[position])
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flow> {
        self.flows.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Flow> {
        self.flows.iter_mut()
    }

    pub fn into_flows(self) -> Vec<Flow> {
        self.flows
    }
}

/// IP 输出 Flow，按通路标签索引。
#[derive(Debug, Clone, Default)]
pub struct IpFlowSet {
    pub primary_video: FlowSet,
    pub secondary_video: FlowSet,
    pub primary_audio: FlowSet,
    pub secondary_audio: FlowSet,
}

impl IpFlowSet {
    pub fn len(&self) -> usize {
        self.primary_video.len()
            + self.secondary_video.len()
            + self.primary_audio.len()
            + self.secondary_audio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Flow> {
        self.primary_video
            .iter_mut()
            .chain(self.secondary_video.iter_mut())
            .chain(self.primary_audio.iter_mut())
            .chain(self.secondary_audio.iter_mut())
    }

    pub fn into_flows(self) -> Vec<Flow> {
        let mut flows = self.primary_video.into_flows();
        flows.extend(self.secondary_video.into_flows());
        flows.extend(self.primary_audio.into_flows());
        flows.extend(self.secondary_audio.into_flows());
        flows
    }
}

/// SDI 输入 Flow：先静态 I/O，后双向 I/O；键重复时先到者保留。
pub fn build_sdi_flows(
    element: &ElementInfo,
    static_rows: &[SdiIoRow],
    bidirectional_rows: &[SdiIoRow],
    interfaces: &DcfInterfaces,
) -> FlowSet {
    let mut flows = FlowSet::new();
    let groups = [
        (SDI_STATIC_IO_DCF_GROUP_ID, static_rows),
        (SDI_BIDIRECTIONAL_IO_DCF_GROUP_ID, bidirectional_rows),
    ];
    for (group_id, rows) in groups {
        for row in rows {
            let mut flow = Flow::new(
                format!("{} SDI {}", element.name, row.key),
                FlowDirection::Rx,
                TransportType::Sdi,
                element.id,
            );
            flow.interface = interfaces.find(group_id, &row.key).map(str::to_string);
            if !flows.insert_if_absent(row.key.clone(), flow) {
                tracing::debug!(element = %element.id, key = %row.key, "duplicate sdi key skipped");
            }
        }
    }
    flows
}

/// 源端口信息（取自 MAC 设置表）。
struct SourcePort {
    ip: String,
    interface: Option<String>,
}

impl SourcePort {
    fn from_row(row: &MacSettingsRow, interfaces: &DcfInterfaces) -> Self {
        Self {
            ip: row.ip_address.clone(),
            interface: interfaces
                .find(MAC_SETTINGS_DCF_GROUP_ID, &row.key)
                .map(str::to_string),
        }
    }
}

enum StreamKind {
    Video,
    Audio,
}

impl StreamKind {
    fn transport(&self) -> TransportType {
        match self {
            StreamKind::Video => TransportType::St2110_20,
            StreamKind::Audio => TransportType::St2110_30,
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            StreamKind::Video => "Video",
            StreamKind::Audio => "Audio",
        }
    }
}

/// IP 输出 Flow：视频按通路选择列映射标签，音频按行键映射标签。
pub fn build_ip_flows(
    element: &ElementInfo,
    mac_rows: &[MacSettingsRow],
    video_rows: &[IpOutputStreamRow],
    audio_rows: &[IpOutputStreamRow],
    interfaces: &DcfInterfaces,
) -> Result<IpFlowSet, NormalizeError> {
    let [primary_row, secondary_row, ..] = mac_rows else {
        return Err(NormalizeError::MissingMacSettings(mac_rows.len()));
    };
    let primary = SourcePort::from_row(primary_row, interfaces);
    let secondary = SourcePort::from_row(secondary_row, interfaces);

    let mut flows = IpFlowSet::default();

    for row in video_rows {
        let selection = row.path_selection.as_deref().unwrap_or_default();
        let label =
            video_path_label(selection).ok_or_else(|| NormalizeError::UnknownPathSelection {
                table: "ip video output streams",
                value: selection.to_string(),
            })?;
        let main = stream_flow(element, &StreamKind::Video, "Main", label, row, &primary, true);
        let backup =
            stream_flow(element, &StreamKind::Video, "Secondary", label, row, &secondary, false);
        flows.primary_video.insert("primary video", label, main)?;
        flows.secondary_video.insert("secondary video", label, backup)?;
    }

    for row in audio_rows {
        let label =
            audio_path_label(&row.key).ok_or_else(|| NormalizeError::UnknownPathSelection {
                table: "ip audio output streams",
                value: row.key.clone(),
            })?;
        let main = stream_flow(element, &StreamKind::Audio, "Main", &row.key, row, &primary, true);
        let backup = stream_flow(
            element,
            &StreamKind::Audio,
            "Secondary",
            &row.key,
            row,
            &secondary,
            false,
        );
        flows.primary_audio.insert("primary audio", label, main)?;
        flows.secondary_audio.insert("secondary audio", label, backup)?;
    }

    Ok(flows)
}

fn stream_flow(
    element: &ElementInfo,
    kind: &StreamKind,
    prefix: &str,
    suffix: &str,
    row: &IpOutputStreamRow,
    source: &SourcePort,
    primary: bool,
) -> Flow {
    let mut flow = Flow::new(
        format!("{} {} {} Stream {}", element.name, prefix, kind.noun(), suffix),
        FlowDirection::Tx,
        kind.transport(),
        element.id,
    );
    flow.interface = source.interface.clone();
    flow.sub_interface = row.key.clone();
    let (destination_ip, destination_port) = if primary {
        (&row.primary_destination_ip, row.primary_destination_port)
    } else {
        (&row.secondary_destination_ip, row.secondary_destination_port)
    };
    flow.ip = Some(IpTransport {
        source_ip: source.ip.clone(),
        destination_ip: destination_ip.clone(),
        destination_port,
    });
    flow
}
