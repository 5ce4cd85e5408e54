//! 同步流程：读表 -> 构建 Flow/VSG -> 发布资源 -> 清理过期资源。

pub mod publisher;
pub mod report;

pub use publisher::{
    INPUT_VSGS_PROPERTY, OUTPUT_VSGS_PROPERTY, PATH_PROPERTY, PublishTarget, build_resource,
    ensure_capability_parameter, ensure_pool,
};
pub use report::{ElementFailure, ElementSummary, SyncReport};

use domain::{ElementId, ElementInfo, Resource, VideoPathData};
use neuron_ingest::{ElementDirectory, ElementTables, IngestError, NeuronTableReader};
use neuron_normalize::{
    NormalizeError, StorageCatalog, VsgBuilder, build_ip_flows, build_sdi_flows,
};
use neuron_storage::{
    FlowStore, InMemoryStores, LevelStore, ProfileParameterStore, ResourcePoolStore,
    ResourceStore, StorageError, VsgStore,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::Instrument;

/// 同步流程错误。
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    #[error("normalize error: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 同步参数。
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub protocol_name: String,
    pub protocol_version: String,
    pub resource_pool_name: String,
    pub capability_parameter_name: String,
    pub resource_max_concurrency: u32,
    pub delete_stale_resources: bool,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            protocol_name: "EVS Neuron NAP - CONVERT".to_string(),
            protocol_version: "Production".to_string(),
            resource_pool_name: "Processors".to_string(),
            capability_parameter_name: "Linked Source".to_string(),
            resource_max_concurrency: 1000,
            delete_stale_resources: true,
        }
    }
}

/// 平台对象存储集合。
#[derive(Clone)]
pub struct SyncStores {
    pub flows: Arc<dyn FlowStore>,
    pub vsgs: Arc<dyn VsgStore>,
    pub levels: Arc<dyn LevelStore>,
    pub pools: Arc<dyn ResourcePoolStore>,
    pub resources: Arc<dyn ResourceStore>,
    pub parameters: Arc<dyn ProfileParameterStore>,
}

impl From<&InMemoryStores> for SyncStores {
    fn from(stores: &InMemoryStores) -> Self {
        Self {
            flows: stores.flows.clone(),
            vsgs: stores.vsgs.clone(),
            levels: stores.levels.clone(),
            pools: stores.pools.clone(),
            resources: stores.resources.clone(),
            parameters: stores.parameters.clone(),
        }
    }
}

/// 单个元素成功同步后的产出。
struct ElementOutcome {
    summary: ElementSummary,
    resource_names: HashSet<String>,
}

pub struct SyncPipeline {
    directory: Arc<dyn ElementDirectory>,
    tables: Arc<dyn ElementTables>,
    stores: SyncStores,
    settings: SyncSettings,
}

impl SyncPipeline {
    pub fn new(
        directory: Arc<dyn ElementDirectory>,
        tables: Arc<dyn ElementTables>,
        stores: SyncStores,
        settings: SyncSettings,
    ) -> Self {
        Self {
            directory,
            tables,
            stores,
            settings,
        }
    }

    /// 执行一次完整同步。单个元素失败只记录，不中断其余元素。
    pub async fn run(&self) -> Result<SyncReport, PipelineError> {
        let run_id = neuron_telemetry::new_run_id();
        let span = tracing::info_span!("sync", run_id = %run_id);
        self.run_elements(SyncReport::new(run_id))
            .instrument(span)
            .await
    }

    async fn run_elements(&self, mut report: SyncReport) -> Result<SyncReport, PipelineError> {
        // 过期判定基于全部元素，协议过滤只决定处理哪些元素
        let all_elements = self.directory.list_elements().await?;
        let elements: Vec<&ElementInfo> = all_elements
            .iter()
            .filter(|element| {
                element.runs_protocol(&self.settings.protocol_name, &self.settings.protocol_version)
            })
            .collect();
        tracing::info!(elements = elements.len(), "matching elements found");

        let target = self.publish_target().await?;
        let mut published: HashMap<ElementId, HashSet<String>> = HashMap::new();

        for element in elements {
            if !element.is_active() {
                tracing::info!(
                    element = %element.id,
                    name = %element.name,
                    "element not active, skipped"
                );
                report.skipped.push(element.id);
                continue;
            }
            let span = tracing::info_span!("element", element = %element.id, name = %element.name);
            match self.sync_element(element, &target).instrument(span).await {
                Ok(outcome) => {
                    neuron_telemetry::record_element_processed();
                    published.insert(element.id, outcome.resource_names);
                    report.record_processed(outcome.summary);
                }
                Err(err) => {
                    tracing::warn!(
                        element = %element.id,
                        name = %element.name,
                        error = %err,
                        "element sync failed"
                    );
                    neuron_telemetry::record_element_failed();
                    report.record_failed(ElementFailure {
                        element: element.id,
                        name: element.name.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        if self.settings.delete_stale_resources {
            let known: HashSet<ElementId> = all_elements.iter().map(|element| element.id).collect();
            report.resources_deleted = self.delete_stale(&target, &known, &published).await?;
        }

        tracing::info!(
            processed = report.processed.len(),
            failed = report.failed.len(),
            resources_deleted = report.resources_deleted,
            "sync finished"
        );
        Ok(report)
    }

    async fn publish_target(&self) -> Result<PublishTarget, PipelineError> {
        let pool =
            ensure_pool(self.stores.pools.as_ref(), &self.settings.resource_pool_name).await?;
        let capability = ensure_capability_parameter(
            self.stores.parameters.as_ref(),
            &self.settings.capability_parameter_name,
        )
        .await?;
        Ok(PublishTarget {
            pool,
            capability,
            max_concurrency: self.settings.resource_max_concurrency,
        })
    }

    async fn sync_element(
        &self,
        element: &ElementInfo,
        target: &PublishTarget,
    ) -> Result<ElementOutcome, PipelineError> {
        let reader = NeuronTableReader::new(self.tables.clone(), element.id);
        let interfaces = reader.dcf_interfaces().await?;
        let mut sdi_flows = build_sdi_flows(
            element,
            &reader.sdi_static_io_rows().await?,
            &reader.sdi_bidirectional_io_rows().await?,
            &interfaces,
        );
        let mut ip_flows = build_ip_flows(
            element,
            &reader.mac_settings_rows().await?,
            &reader.ip_video_output_stream_rows().await?,
            &reader.ip_audio_output_stream_rows().await?,
            &interfaces,
        )?;

        // 链接前沿用已有 Flow 的 id
        for flow in sdi_flows.iter_mut().chain(ip_flows.iter_mut()) {
            if let Some(existing) = self.stores.flows.find_flow_by_name(&flow.name).await? {
                flow.id = existing.id;
            }
        }

        let builder = VsgBuilder::new(Arc::new(StorageCatalog::new(
            self.stores.levels.clone(),
            self.stores.vsgs.clone(),
        )));
        // 先构建全部 VSG；任一通路失败时本元素不写入任何 Flow / VSG
        let mut paths = Vec::new();
        let mut built = Vec::new();
        for path in reader.video_path_rows().await? {
            let input = builder
                .build_destination(element, &path, &mut sdi_flows)
                .await?;
            let output = builder.build_source(element, &path, &mut ip_flows).await?;
            paths.push(VideoPathData {
                index: path.key,
                input_vsg: input.as_ref().map(|vsg| vsg.id),
                output_vsg: Some(output.id),
            });
            built.extend(input);
            built.push(output);
        }

        // Flow 先于 VSG 写入，VSG 引用的 Flow 始终已存在
        let mut flows = 0;
        for flow in sdi_flows.into_flows().into_iter().chain(ip_flows.into_flows()) {
            self.stores.flows.upsert_flow(flow).await?;
            flows += 1;
        }
        let vsgs = built.len();
        for vsg in built {
            self.stores.vsgs.upsert_vsg(vsg).await?;
        }

        let resources: Vec<Resource> = paths
            .iter()
            .map(|path| build_resource(element, path, target))
            .collect();
        let resource_names = resources.iter().map(|resource| resource.name.clone()).collect();
        let stored = self.stores.resources.upsert_resources(resources).await?;

        neuron_telemetry::record_flows_upserted(flows as u64);
        neuron_telemetry::record_vsgs_upserted(vsgs as u64);
        neuron_telemetry::record_resources_upserted(stored.len() as u64);
        tracing::info!(flows, vsgs, resources = stored.len(), "element synced");

        Ok(ElementOutcome {
            summary: ElementSummary {
                element: element.id,
                name: element.name.clone(),
                flows,
                vsgs,
                resources: stored.len(),
            },
            resource_names,
        })
    }

    /// 删除池内过期资源：元素已不存在（任何协议），或已同步元素的通路已不存在。
    async fn delete_stale(
        &self,
        target: &PublishTarget,
        known: &HashSet<ElementId>,
        published: &HashMap<ElementId, HashSet<String>>,
    ) -> Result<usize, PipelineError> {
        let mut deleted = 0;
        for resource in self
            .stores
            .resources
            .list_resources_in_pool(target.pool.id)
            .await?
        {
            let Some(element) = resource.element else {
                continue;
            };
            let stale = !known.contains(&element)
                || published
                    .get(&element)
                    .is_some_and(|names| !names.contains(&resource.name));
            if stale && self.stores.resources.delete_resource(resource.id).await? {
                tracing::info!(
                    resource = %resource.name,
                    element = %element,
                    "stale resource deleted"
                );
                deleted += 1;
            }
        }
        neuron_telemetry::record_resources_deleted(deleted as u64);
        Ok(deleted)
    }
}
