use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Name of one scanned repository, unique within a run.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepoId(String);

impl RepoId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoCount {
    pub repo: RepoId,
    pub commits: u32,
}

/// Everything known about one calendar day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBreakdown {
    pub date: NaiveDate,
    pub total: u32,
    /// Sorted by descending commits, then repository name.
    pub repositories: Vec<RepoCount>,
}

/// Per-day commit counts for one aggregation run.
///
/// Only days and repositories with at least one commit are stored, so the per-repo
/// maps never hold zeros and `totals` always equals the sum of its day's entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActivityTable {
    per_day: BTreeMap<NaiveDate, BTreeMap<RepoId, u32>>,
    totals: BTreeMap<NaiveDate, u32>,
}

impl ActivityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one commit per date for `repo`. Duplicate dates are separate commits.
    pub fn record<I>(&mut self, repo: &RepoId, dates: I)
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        for date in dates {
            *self
                .per_day
                .entry(date)
                .or_default()
                .entry(repo.clone())
                .or_insert(0) += 1;
            *self.totals.entry(date).or_insert(0) += 1;
        }
    }

    /// Fold another table into this one. Order of merges does not matter.
    pub fn merge(&mut self, other: ActivityTable) {
        for (date, repos) in other.per_day {
            let day = self.per_day.entry(date).or_default();
            for (repo, count) in repos {
                *day.entry(repo).or_insert(0) += count;
            }
        }
        for (date, count) in other.totals {
            *self.totals.entry(date).or_insert(0) += count;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn total(&self, date: NaiveDate) -> u32 {
        self.totals.get(&date).copied().unwrap_or(0)
    }

    /// The day totals table, keyed by date in ascending order.
    pub fn totals(&self) -> &BTreeMap<NaiveDate, u32> {
        &self.totals
    }

    pub fn total_commits(&self) -> u64 {
        self.totals.values().map(|&c| c as u64).sum()
    }

    /// Highest single-day total among days in `[from, to]`.
    pub fn max_total_between(&self, from: NaiveDate, to: NaiveDate) -> u32 {
        if from > to {
            return 0;
        }
        self.totals
            .range(from..=to)
            .map(|(_, &c)| c)
            .max()
            .unwrap_or(0)
    }

    pub fn repo_counts(&self, date: NaiveDate) -> Option<&BTreeMap<RepoId, u32>> {
        self.per_day.get(&date)
    }

    /// Total and sorted per-repository breakdown; a day without commits has total 0
    /// and an empty breakdown.
    pub fn breakdown(&self, date: NaiveDate) -> DayBreakdown {
        let mut repositories: Vec<RepoCount> = self
            .per_day
            .get(&date)
            .map(|repos| {
                repos
                    .iter()
                    .map(|(repo, &commits)| RepoCount {
                        repo: repo.clone(),
                        commits,
                    })
                    .collect()
            })
            .unwrap_or_default();

        repositories.sort_by(|a, b| b.commits.cmp(&a.commits).then_with(|| a.repo.cmp(&b.repo)));

        DayBreakdown {
            date,
            total: self.total(date),
            repositories,
        }
    }
}
