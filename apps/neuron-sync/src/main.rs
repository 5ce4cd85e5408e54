//! Neuron 表同步：读取元素快照，发布 Flow / VSG / 资源，并输出运行报告。

use neuron_config::AppConfig;
use neuron_ingest::InMemoryDms;
use neuron_pipeline::{SyncPipeline, SyncSettings, SyncStores};
use neuron_storage::{InMemoryStores, StoreState};
use neuron_telemetry::{init_tracing, metrics};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let dms = Arc::new(InMemoryDms::load(&config.snapshot_path)?);
    // 未配置状态文件时每次运行从空平台开始
    let state = match &config.state_path {
        Some(path) => StoreState::load_or_default(path)?,
        None => StoreState::with_default_levels(),
    };
    let stores = InMemoryStores::from_state(state);

    let pipeline = SyncPipeline::new(
        dms.clone(),
        dms,
        SyncStores::from(&stores),
        sync_settings(&config),
    );
    let report = pipeline.run().await?;

    if let Some(path) = &config.state_path {
        stores.to_state()?.save(path)?;
        tracing::info!(path = %path, "state saved");
    }
    tracing::debug!(metrics = ?metrics().snapshot(), "run metrics");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn sync_settings(config: &AppConfig) -> SyncSettings {
    SyncSettings {
        protocol_name: config.protocol_name.clone(),
        protocol_version: config.protocol_version.clone(),
        resource_pool_name: config.resource_pool_name.clone(),
        capability_parameter_name: config.capability_parameter_name.clone(),
        resource_max_concurrency: config.resource_max_concurrency,
        delete_stale_resources: config.delete_stale_resources,
    }
}
