use git2::{Commit, DiffFormat, DiffOptions, Repository};

use crate::error::{Error, Result};

/// Extensions included in the diff payload. Everything else (lockfiles,
/// binaries, vendored assets) is skipped to keep the prompt small.
pub const DIFF_EXTENSIONS: &[&str] = &[
    "rs", "ts", "js", "py", "java", "cpp", "cs", "go", "rb", "php", "yaml", "yml", "json",
];

/// Returns the unified patch between `from` and `to`, restricted to
/// [`DIFF_EXTENSIONS`]. Fails with [`Error::InvalidRange`] when the
/// `(from, to]` range contains no commits.
pub fn diff_range(repo: &Repository, from: &str, to: &str) -> Result<String> {
    let from_commit = resolve_commit(repo, from)?;
    let to_commit = resolve_commit(repo, to)?;

    verify_range(repo, &from_commit, &to_commit)?;

    let mut opts = DiffOptions::new();
    for ext in DIFF_EXTENSIONS {
        opts.pathspec(format!("*.{ext}"));
    }

    let diff = repo.diff_tree_to_tree(
        Some(&from_commit.tree()?),
        Some(&to_commit.tree()?),
        Some(&mut opts),
    )?;

    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => text.push(line.origin()),
            _ => {}
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(|e| Error::Diff(e.to_string()))?;

    tracing::debug!("Diff {}..{} is {} bytes", from, to, text.len());
    Ok(text)
}

fn resolve_commit<'r>(repo: &'r Repository, reference: &str) -> Result<Commit<'r>> {
    Ok(repo.revparse_single(reference)?.peel_to_commit()?)
}

/// A valid range has `from` as an ancestor of `to` with at least one commit
/// in between, which also rules out `from == to`.
fn verify_range(repo: &Repository, from: &Commit, to: &Commit) -> Result<()> {
    let mut walk = repo.revwalk()?;
    walk.push(to.id())?;
    walk.hide(from.id())?;

    if walk.next().is_none() {
        return Err(Error::InvalidRange {
            from: from.id().to_string(),
            to: to.id().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::test_repo::TestRepo;

    #[test]
    fn diff_contains_only_allowlisted_files() {
        let repo = TestRepo::new();
        let first = repo.commit_file("main.rs", "fn main() {}\n", "base");
        repo.commit_file("login.py", "def login():\n    pass\n", "add login");
        repo.commit_file("notes.txt", "remember the milk\n", "add notes");
        let last = repo.commit_file("config.yaml", "timeout: 5\n", "add config");

        let diff = diff_range(&repo.repo, &first, &last).unwrap();
        assert!(diff.contains("login.py"));
        assert!(diff.contains("config.yaml"));
        assert!(diff.contains("def login()"));
        assert!(!diff.contains("notes.txt"));
        assert!(!diff.contains("remember the milk"));
    }

    #[test]
    fn empty_range_is_rejected() {
        let repo = TestRepo::new();
        let first = repo.commit_file("a.rs", "fn a() {}\n", "first");
        let second = repo.commit_file("b.rs", "fn b() {}\n", "second");

        // Same commit on both sides.
        let err = diff_range(&repo.repo, &second, &second).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));

        // Reversed order: first is not reachable from itself excluding second.
        let err = diff_range(&repo.repo, &second, &first).unwrap_err();
        assert!(matches!(err, Error::InvalidRange { .. }));
    }

    #[test]
    fn unknown_reference_is_a_git_error() {
        let repo = TestRepo::new();
        let first = repo.commit_file("a.rs", "fn a() {}\n", "first");
        let err = diff_range(&repo.repo, &first, "deadbeef").unwrap_err();
        assert!(matches!(err, Error::Git(_)));
    }

    #[test]
    fn oldest_to_newest_concatenates_per_file_hunks() {
        let repo = TestRepo::new();
        let oldest = repo.commit_file("app.js", "const a = 1;\n", "start");
        repo.commit_file("app.js", "const a = 2;\n", "tweak a");
        let newest = repo.commit_file("auth.go", "package auth\n", "add auth");

        let diff = diff_range(&repo.repo, &oldest, &newest).unwrap();
        assert!(diff.contains("app.js"));
        assert!(diff.contains("auth.go"));
        assert!(diff.contains("-const a = 1;"));
        assert!(diff.contains("+const a = 2;"));
    }
}
