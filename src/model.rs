use crate::activity::{RepoCount, RepoOutcome, RunStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub row: usize,
    pub column: usize,
    pub count: u32,
    pub level: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelLegend {
    pub level: usize,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnLabel {
    pub column: usize,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub status: RunStatus,
    pub today: NaiveDate,
    pub window_start: NaiveDate,
    pub rows: usize,
    pub columns: usize,
    pub total_commits: u64,
    pub shading: String,
    pub legend: Vec<LevelLegend>,
    pub month_labels: Vec<ColumnLabel>,
    /// Empty unless `status` is `ready`.
    pub days: Vec<DayCell>,
    pub repositories: Vec<RepoOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayOutput {
    pub version: u32,
    pub date: Option<NaiveDate>,
    /// `false` when the requested cell has no day behind it.
    pub available: bool,
    pub total: u32,
    pub repositories: Vec<RepoCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub root: String,
    pub status: RunStatus,
    pub total_commits: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_error: Option<String>,
    pub repositories: Vec<RepoOutcome>,
}
