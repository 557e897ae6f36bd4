//! Fixture repository helpers shared by the git module tests.

use git2::Repository;
use std::path::Path;
use tempfile::TempDir;

pub struct TestRepo {
    pub dir: TempDir,
    pub repo: Repository,
    // Commit timestamps need distinct seconds so Sort::TIME is deterministic.
    clock: std::cell::Cell<i64>,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let repo = Repository::init(dir.path()).expect("init repo");
        let clock = std::cell::Cell::new(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("system time")
                .as_secs() as i64,
        );
        Self { dir, repo, clock }
    }

    /// Writes `contents` to `name`, stages it, and commits. Returns the hash.
    pub fn commit_file(&self, name: &str, contents: &str, message: &str) -> String {
        std::fs::write(self.dir.path().join(name), contents).expect("write file");

        let mut index = self.repo.index().expect("index");
        index.add_path(Path::new(name)).expect("add path");
        index.write().expect("write index");
        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");
        let when = git2::Time::new(self.clock.get(), 0);
        self.clock.set(self.clock.get() + 1);
        let signature = git2::Signature::new("Test User", "test@example.com", &when)
            .expect("signature");

        let parents = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().expect("head commit")],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<_> = parents.iter().collect();

        self.repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &parent_refs,
            )
            .expect("commit")
            .to_string()
    }
}
