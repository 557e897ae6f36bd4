pub mod diff;
pub mod history;

#[cfg(test)]
pub(crate) mod test_repo;

pub use diff::{diff_range, DIFF_EXTENSIONS};
pub use history::{list_recent_commits, open_repo, CommitInfo};
