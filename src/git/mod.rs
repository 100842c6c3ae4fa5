pub mod discover;
pub mod repo;
pub mod source;

pub use discover::{discover_repositories, repo_name};
pub use repo::GitRepo;
pub use source::{parse_date_lines, DateSource, GitLogSource, GixSource, SourceKind};
