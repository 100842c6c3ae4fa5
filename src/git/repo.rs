use crate::error::{CommitMapError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use gix::{ObjectId, Repository};
use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open exactly the repository at `path`. Parent directories are not searched,
    /// so a plain folder inside some other checkout is reported as not a repository.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_dir() {
            return Err(CommitMapError::NotARepository(path));
        }
        let repo = gix::open(&path)?;
        Ok(Self { repo })
    }

    /// One calendar day per commit reachable from HEAD, in walk order.
    ///
    /// Each day is the author date in the timezone offset recorded on the commit, which
    /// is the day `git log --date=short --format=%ad` would print. An unborn HEAD yields
    /// no dates.
    pub fn commit_dates(&self) -> Result<Vec<NaiveDate>> {
        let mut head = self.repo.head()?;
        if head.is_unborn() {
            return Ok(Vec::new());
        }
        let head_commit = head.peel_to_commit_in_place()?;

        let mut dates = Vec::new();
        let mut seen: HashSet<ObjectId> = HashSet::new();
        let mut stack: VecDeque<ObjectId> = VecDeque::from([head_commit.id]);

        while let Some(commit_id) = stack.pop_back() {
            if !seen.insert(commit_id) {
                continue;
            }

            let commit = self.repo.find_commit(commit_id)?;
            let time = author_time(&commit)?;
            dates.push(commit_day(time.seconds, time.offset)?);

            for pid in commit.parent_ids() {
                stack.push_back(pid.detach());
            }
        }

        Ok(dates)
    }
}

/// Author signature time; unlike the committer time it survives rebases and amends.
fn author_time(commit: &gix::Commit<'_>) -> Result<gix::date::Time> {
    let author = commit.author().map_err(gix::object::commit::Error::from)?;
    Ok(author.time().map_err(gix::object::commit::Error::from)?)
}

pub(crate) fn commit_day(seconds: i64, offset_seconds: i32) -> Result<NaiveDate> {
    let tz = FixedOffset::east_opt(offset_seconds)
        .ok_or_else(|| CommitMapError::InvalidDate(format!("Invalid offset: {offset_seconds}")))?;
    let utc = DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| CommitMapError::InvalidDate(format!("Invalid timestamp: {seconds}")))?;
    Ok(utc.with_timezone(&tz).date_naive())
}
