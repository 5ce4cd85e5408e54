use domain::ElementId;
use serde::Serialize;

/// 单个元素的同步结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementSummary {
    pub element: ElementId,
    pub name: String,
    pub flows: usize,
    pub vsgs: usize,
    pub resources: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementFailure {
    pub element: ElementId,
    pub name: String,
    pub error: String,
}

/// 一次同步运行的汇总。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub run_id: String,
    pub processed: Vec<ElementSummary>,
    pub failed: Vec<ElementFailure>,
    pub skipped: Vec<ElementId>,
    pub flows_upserted: usize,
    pub vsgs_upserted: usize,
    pub resources_upserted: usize,
    pub resources_deleted: usize,
}

impl SyncReport {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            ..Self::default()
        }
    }

    pub fn record_processed(&mut self, summary: ElementSummary) {
        self.flows_upserted += summary.flows;
        self.vsgs_upserted += summary.vsgs;
        self.resources_upserted += summary.resources;
        self.processed.push(summary);
    }

    pub fn record_failed(&mut self, failure: ElementFailure) {
        self.failed.push(failure);
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}
