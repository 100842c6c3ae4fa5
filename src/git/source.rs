use crate::error::{CommitMapError, Result};
use crate::git::GitRepo;
use chrono::NaiveDate;
use clap::ValueEnum;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// Produces one calendar day per commit for a repository path.
///
/// Order is unspecified; the aggregator does not depend on it.
pub trait DateSource {
    fn commit_dates(&self, repo: &Path) -> Result<Vec<NaiveDate>>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    /// Read commits in-process with gix
    #[default]
    Gix,
    /// Shell out to `git log --date=short --format=%ad`
    Git,
}

impl SourceKind {
    pub fn build(self) -> Box<dyn DateSource> {
        match self {
            SourceKind::Gix => Box::new(GixSource),
            SourceKind::Git => Box::new(GitLogSource::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GixSource;

impl DateSource for GixSource {
    fn commit_dates(&self, repo: &Path) -> Result<Vec<NaiveDate>> {
        GitRepo::open(repo)?.commit_dates()
    }
}

#[derive(Clone, Debug)]
pub struct GitLogSource {
    pub timeout: Duration,
}

impl Default for GitLogSource {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl DateSource for GitLogSource {
    fn commit_dates(&self, repo: &Path) -> Result<Vec<NaiveDate>> {
        let mut command = Command::new("git");
        command
            .arg("-C")
            .arg(repo)
            .args(["log", "--date=short", "--format=%ad"])
            .env("LC_ALL", "C");
        let output = run_with_timeout(command, self.timeout)?;

        if !output.status.success() {
            let reason = output.stderr.trim();
            if reason.contains("does not have any commits yet") {
                return Ok(Vec::new());
            }
            return Err(CommitMapError::Source(if reason.is_empty() {
                format!("git log exited with {}", output.status)
            } else {
                reason.to_string()
            }));
        }

        parse_date_lines(&output.stdout)
    }
}

#[derive(Debug)]
struct CapturedOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

/// Run `command` to completion, killing it once `timeout` has passed.
fn run_with_timeout(mut command: Command, timeout: Duration) -> Result<CapturedOutput> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CommitMapError::Source(format!("failed to run git: {e}")))?;

    // Both pipes are drained while we poll, or a chatty child blocks on a full buffer.
    let stdout = drain(child.stdout.take(), "stdout")?;
    let stderr = drain(child.stderr.take(), "stderr")?;

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CommitMapError::Timeout(timeout.as_secs()));
        }
        std::thread::sleep(Duration::from_millis(20));
    };

    Ok(CapturedOutput {
        status,
        stdout: join_reader(stdout)?,
        stderr: join_reader(stderr)?,
    })
}

fn drain<R>(pipe: Option<R>, name: &str) -> Result<JoinHandle<io::Result<String>>>
where
    R: Read + Send + 'static,
{
    let mut pipe =
        pipe.ok_or_else(|| CommitMapError::Source(format!("git {name} unavailable")))?;
    Ok(std::thread::spawn(move || {
        let mut buf = String::new();
        pipe.read_to_string(&mut buf).map(|_| buf)
    }))
}

fn join_reader(handle: JoinHandle<io::Result<String>>) -> Result<String> {
    let text = handle
        .join()
        .map_err(|_| CommitMapError::Source("git output reader panicked".to_string()))??;
    Ok(text)
}

/// Parse the one-date-per-line contract: blank lines are skipped, anything else
/// must be a `YYYY-MM-DD` date.
pub fn parse_date_lines(text: &str) -> Result<Vec<NaiveDate>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            NaiveDate::parse_from_str(line, "%Y-%m-%d")
                .map_err(|e| CommitMapError::InvalidDate(format!("'{line}': {e}")))
        })
        .collect()
}
