use crate::error::Result;
use crate::git::{discover_repositories, repo_name, DateSource};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

use super::aggregate::{ActivityTable, RepoId};

/// What happened to one repository during a run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RepoOutcome {
    Scanned { repo: RepoId, commits: usize },
    Skipped { repo: RepoId, reason: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_error: Option<String>,
    pub outcomes: Vec<RepoOutcome>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Ready,
    NoRepositories,
    NoCommits,
}

impl RunReport {
    pub fn scanned(&self) -> impl Iterator<Item = (&RepoId, usize)> {
        self.outcomes.iter().filter_map(|o| match o {
            RepoOutcome::Scanned { repo, commits } => Some((repo, *commits)),
            RepoOutcome::Skipped { .. } => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&RepoId, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            RepoOutcome::Skipped { repo, reason } => Some((repo, reason.as_str())),
            RepoOutcome::Scanned { .. } => None,
        })
    }

    pub fn status(&self, table: &ActivityTable) -> RunStatus {
        if self.outcomes.is_empty() {
            RunStatus::NoRepositories
        } else if table.is_empty() {
            RunStatus::NoCommits
        } else {
            RunStatus::Ready
        }
    }
}

/// Fold per-repository fetch results into a table. Failed fetches are reported and
/// skipped; they never abort the run.
pub fn aggregate_results<I>(results: I) -> (ActivityTable, RunReport)
where
    I: IntoIterator<Item = (RepoId, Result<Vec<NaiveDate>>)>,
{
    let mut table = ActivityTable::new();
    let mut report = RunReport::default();

    for (repo, result) in results {
        match result {
            Ok(dates) => {
                debug!("{repo}: {} commits", dates.len());
                let commits = dates.len();
                table.record(&repo, dates);
                report.outcomes.push(RepoOutcome::Scanned { repo, commits });
            }
            Err(e) => {
                warn!("skipping {repo}: {e}");
                report.outcomes.push(RepoOutcome::Skipped {
                    repo,
                    reason: e.to_string(),
                });
            }
        }
    }

    (table, report)
}

/// Fetch every repository first, then aggregate.
pub fn collect_activity(
    repos: &[PathBuf],
    source: &dyn DateSource,
    show_progress: bool,
) -> (ActivityTable, RunReport) {
    let pb = if show_progress {
        let pb = ProgressBar::new(repos.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:30.green}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let mut fetched = Vec::with_capacity(repos.len());
    for path in repos {
        let repo = RepoId::new(repo_name(path));
        pb.set_message(repo.to_string());
        fetched.push((repo, source.commit_dates(path)));
        pb.inc(1);
    }
    pb.finish_and_clear();

    aggregate_results(fetched)
}

/// Discover repositories under `root` and collect their activity. An unusable root
/// is recorded in the report and yields an empty run.
pub fn collect_root(
    root: &Path,
    source: &dyn DateSource,
    show_progress: bool,
) -> (ActivityTable, RunReport) {
    let repos = match discover_repositories(root) {
        Ok(repos) => repos,
        Err(e) => {
            warn!("{e}");
            return (
                ActivityTable::new(),
                RunReport {
                    root_error: Some(e.to_string()),
                    outcomes: Vec::new(),
                },
            );
        }
    };
    info!("found {} repositories under {}", repos.len(), root.display());
    collect_activity(&repos, source, show_progress)
}
