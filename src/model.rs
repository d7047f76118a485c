use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricRow {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassMetricRow {
    pub class: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// The emitted scoring report. Every numeric field is finite: metrics
/// that would divide by zero are already resolved to 0 upstream, so the
/// document stays machine-parseable.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub report_version: u32,
    pub generated_at: String,
    pub record_count: usize,
    pub class_count: usize,
    pub jaccard_index: f64,
    pub aggregate: MetricRow,
    pub per_class: Vec<ClassMetricRow>,
}
