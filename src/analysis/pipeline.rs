use std::io::Write;
use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::ConfigStore;
use crate::error::{Error, Result};
use crate::git;
use crate::llm::ModelInvoker;
use crate::ui::{Interaction, ResultView};

const DEFAULT_COMMIT_LIMIT: usize = 20;

/// Sequences one analysis flow: pick two commits, describe the issue, fetch
/// the diff, invoke the model, present the result. Owns the long-lived
/// handles (store, view, interaction) for the whole process.
pub struct Pipeline<I: Interaction, W: Write> {
    repo_path: PathBuf,
    store: ConfigStore,
    interaction: I,
    view: ResultView<W>,
    invoker: ModelInvoker,
    commit_limit: usize,
}

impl<I: Interaction, W: Write> Pipeline<I, W> {
    pub fn new(
        repo_path: PathBuf,
        store: ConfigStore,
        interaction: I,
        view: ResultView<W>,
        invoker: ModelInvoker,
    ) -> Self {
        Self {
            repo_path,
            store,
            interaction,
            view,
            invoker,
            commit_limit: DEFAULT_COMMIT_LIMIT,
        }
    }

    pub fn with_commit_limit(mut self, limit: usize) -> Self {
        self.commit_limit = limit;
        self
    }

    /// The full flow. Any dismissed prompt aborts with [`Error::Cancelled`];
    /// configuration saves made along the way are not rolled back.
    pub async fn analyze(&mut self) -> Result<()> {
        let repo = git::open_repo(&self.repo_path)?;
        let commits = git::list_recent_commits(&repo, self.commit_limit)?;

        let from = self
            .interaction
            .pick_commit("Select starting commit", &commits)?
            .ok_or(Error::Cancelled)?;
        let to = self
            .interaction
            .pick_commit("Select ending commit", &commits)?
            .ok_or(Error::Cancelled)?;

        let issue = self
            .interaction
            .input("Describe the production issue", "")?
            .ok_or(Error::Cancelled)?;
        if issue.trim().is_empty() {
            return Err(Error::Cancelled);
        }

        let progress = spinner();
        progress.set_message("Fetching git diff...");
        let diff = git::diff_range(&repo, &from.hash, &to.hash)?;

        progress.set_message("Analyzing with AI...");
        let analysis = self
            .invoker
            .analyze(&mut self.store, &mut self.interaction, &diff, &issue)
            .await?;
        progress.finish_and_clear();

        self.view.show(&analysis, &issue, &from.hash, &to.hash)?;
        Ok(())
    }

    /// Interactive credential prompt followed by a save.
    pub fn configure(&mut self) -> Result<()> {
        let Some(config) = self.store.prompt_for_config(&mut self.interaction)? else {
            return Err(Error::Cancelled);
        };
        self.store.save(&config)?;
        Ok(())
    }

    /// Wipes the stored configuration after a confirmation.
    pub fn clear(&mut self) -> Result<()> {
        if !self
            .interaction
            .confirm("Remove the stored provider configuration?")?
        {
            return Err(Error::Cancelled);
        }
        self.store.clear()
    }

    pub fn view(&self) -> &ResultView<W> {
        &self.view
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }
}

fn spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb
}
