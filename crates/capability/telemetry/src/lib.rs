//! 追踪初始化、运行 ID 与同步计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 基础指标快照。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub elements_processed: u64,
    pub elements_failed: u64,
    pub flows_upserted: u64,
    pub vsgs_upserted: u64,
    pub resources_upserted: u64,
    pub resources_deleted: u64,
    pub levels_missing: u64,
}

/// 同步过程计数（进程级累计）。
pub struct TelemetryMetrics {
    elements_processed: AtomicU64,
    elements_failed: AtomicU64,
    flows_upserted: AtomicU64,
    vsgs_upserted: AtomicU64,
    resources_upserted: AtomicU64,
    resources_deleted: AtomicU64,
    levels_missing: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            elements_processed: AtomicU64::new(0),
            elements_failed: AtomicU64::new(0),
            flows_upserted: AtomicU64::new(0),
            vsgs_upserted: AtomicU64::new(0),
            resources_upserted: AtomicU64::new(0),
            resources_deleted: AtomicU64::new(0),
            levels_missing: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            elements_processed: self.elements_processed.load(Ordering::Relaxed),
            elements_failed: self.elements_failed.load(Ordering::Relaxed),
            flows_upserted: self.flows_upserted.load(Ordering::Relaxed),
            vsgs_upserted: self.vsgs_upserted.load(Ordering::Relaxed),
            resources_upserted: self.resources_upserted.load(Ordering::Relaxed),
            resources_deleted: self.resources_deleted.load(Ordering::Relaxed),
            levels_missing: self.levels_missing.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 run_id。
pub fn new_run_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn record_element_processed() {
    metrics().elements_processed.fetch_add(1, Ordering::Relaxed);
}

pub fn record_element_failed() {
    metrics().elements_failed.fetch_add(1, Ordering::Relaxed);
}

pub fn record_flows_upserted(count: u64) {
    metrics().flows_upserted.fetch_add(count, Ordering::Relaxed);
}

pub fn record_vsgs_upserted(count: u64) {
    metrics().vsgs_upserted.fetch_add(count, Ordering::Relaxed);
}

pub fn record_resources_upserted(count: u64) {
    metrics()
        .resources_upserted
        .fetch_add(count, Ordering::Relaxed);
}

pub fn record_resources_deleted(count: u64) {
    metrics().resources_deleted.fetch_add(count, Ordering::Relaxed);
}

/// 记录 Levels 表中缺失层级导致的跳过。
pub fn record_level_missing() {
    metrics().levels_missing.fetch_add(1, Ordering::Relaxed);
}
