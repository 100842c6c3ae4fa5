use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CommitMapError>;

#[derive(Error, Debug)]
pub enum CommitMapError {
    #[error("Git open error: {0}")]
    GitOpen(#[from] Box<gix::open::Error>),
    #[error("Not a git repository: {}", .0.display())]
    NotARepository(PathBuf),
    #[error("Commit source error: {0}")]
    Source(String),
    #[error("Commit source timed out after {0}s")]
    Timeout(u64),
    #[error("Invalid repository root: {0}")]
    InvalidRoot(String),
    #[error("Invalid thresholds: {0}")]
    InvalidThresholds(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Object find error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
}

// gix errors are large; keep the enum small by boxing them on conversion.
impl From<gix::open::Error> for CommitMapError {
    fn from(err: gix::open::Error) -> Self {
        CommitMapError::GitOpen(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for CommitMapError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        CommitMapError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for CommitMapError {
    fn from(err: gix::object::commit::Error) -> Self {
        CommitMapError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for CommitMapError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        CommitMapError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for CommitMapError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        CommitMapError::HeadPeel(Box::new(err))
    }
}
