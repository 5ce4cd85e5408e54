//! VSG 构建：目的端（SDI 输入）与源端（IP 输出）。

use crate::flows::{FlowSet, IpFlowSet};
use crate::{NormalizeError, SignalGroupCatalog};
use domain::{ElementInfo, Flow, FlowColor, Level, Role, VirtualSignalGroup};
use neuron_ingest::neuron::VideoPathRow;
use std::sync::Arc;

/// 视频通路输入值与 SDI Flow 键的偏移。
pub const SDI_INPUT_OFFSET: i32 = 528;
/// 有效输入值上界（不含）。
pub const SDI_INPUT_LIMIT: i32 = 561;

/// 通路输入值 -> SDI Flow 键；超出范围或超过现有 Flow 数时为 None。
pub fn sdi_flow_key(input: i32, sdi_flow_count: usize) -> Option<String> {
    if input <= SDI_INPUT_OFFSET || input >= SDI_INPUT_LIMIT {
        return None;
    }
    let index = input - SDI_INPUT_OFFSET;
    let within = usize::try_from(index).is_ok_and(|index| index <= sdi_flow_count);
    within.then(|| index.to_string())
}

pub struct VsgBuilder {
    catalog: Arc<dyn SignalGroupCatalog>,
}

impl VsgBuilder {
    pub fn new(catalog: Arc<dyn SignalGroupCatalog>) -> Self {
        Self { catalog }
    }

    /// 目的端 VSG；没有任何 Flow 被分配时返回 None。
    pub async fn build_destination(
        &self,
        element: &ElementInfo,
        path: &VideoPathRow,
        sdi_flows: &mut FlowSet,
    ) -> Result<Option<VirtualSignalGroup>, NormalizeError> {
        let mut vsg = self.new_vsg(element, path, Role::Destination).await?;
        let count = sdi_flows.len();
        let mut assigned = false;

        for (input, color) in [
            (path.main_input, FlowColor::Blue),
            (path.backup_input, FlowColor::Red),
        ] {
            let Some(key) = sdi_flow_key(input, count) else {
                continue;
            };
            let flow = sdi_flows
                .get_mut(&key)
                .ok_or(NormalizeError::MissingFlow { kind: "sdi", key })?;
            self.assign(&mut vsg, flow, Level::Video, color).await?;
            assigned = true;
        }

        Ok(assigned.then_some(vsg))
    }

    /// 源端 VSG：主视频/主音频为 Blue，备视频/备音频为 Red。
    pub async fn build_source(
        &self,
        element: &ElementInfo,
        path: &VideoPathRow,
        ip_flows: &mut IpFlowSet,
    ) -> Result<VirtualSignalGroup, NormalizeError> {
        let mut vsg = self.new_vsg(element, path, Role::Source).await?;
        let key = path.key.as_str();

        let flow = take(&mut ip_flows.primary_video, "primary video", key)?;
        self.assign(&mut vsg, flow, Level::Video, FlowColor::Blue)
            .await?;
        let flow = take(&mut ip_flows.primary_audio, "primary audio", key)?;
        self.assign(&mut vsg, flow, Level::Audio1, FlowColor::Blue)
            .await?;
        let flow = take(&mut ip_flows.secondary_video, "secondary video", key)?;
        self.assign(&mut vsg, flow, Level::Video, FlowColor::Red)
            .await?;
        let flow = take(&mut ip_flows.secondary_audio, "secondary audio", key)?;
        self.assign(&mut vsg, flow, Level::Audio1, FlowColor::Red)
            .await?;

        Ok(vsg)
    }

    /// 已存在同名同角色 VSG 时沿用其 id。
    async fn new_vsg(
        &self,
        element: &ElementInfo,
        path: &VideoPathRow,
        role: Role,
    ) -> Result<VirtualSignalGroup, NormalizeError> {
        let mut vsg = VirtualSignalGroup::new(format!("{} {}", element.name, path.key), role);
        if let Some(id) = self.catalog.existing_vsg_id(&vsg.name, role).await? {
            vsg.id = id;
        }
        Ok(vsg)
    }

    async fn assign(
        &self,
        vsg: &mut VirtualSignalGroup,
        flow: &mut Flow,
        level: Level,
        color: FlowColor,
    ) -> Result<(), NormalizeError> {
        flow.link_signal_group(vsg.id);
        match self.catalog.level_id(level).await? {
            Some(level_id) => vsg.link_flow(level_id, flow.id, color),
            None => {
                tracing::debug!(
                    vsg = %vsg.name,
                    level = level.number(),
                    "level not found, section skipped"
                );
                neuron_telemetry::record_level_missing();
            }
        }
        Ok(())
    }
}

fn take<'a>(
    flows: &'a mut FlowSet,
    kind: &'static str,
    key: &str,
) -> Result<&'a mut Flow, NormalizeError> {
    flows.get_mut(key).ok_or_else(|| NormalizeError::MissingFlow {
        kind,
        key: key.to_string(),
    })
}
