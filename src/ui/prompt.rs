use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use crate::error::Result;
use crate::git::CommitInfo;

/// Seam for every interactive step. Each method returns `None` (or `false`)
/// when the user dismisses the prompt; dismissal is not an error here, the
/// caller decides what it means.
pub trait Interaction {
    /// Presents the commits as a pick list and returns the chosen one.
    fn pick_commit(&mut self, prompt: &str, commits: &[CommitInfo]) -> Result<Option<CommitInfo>>;

    /// Free-text input. An empty reply falls back to `prefill` (which may
    /// itself be empty); `None` means the prompt was dismissed.
    fn input(&mut self, prompt: &str, prefill: &str) -> Result<Option<String>>;

    /// Yes/no confirmation, defaulting to no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Terminal implementation over any reader/writer pair. Dismissal is EOF
/// (ctrl-d), or an empty reply on the pick list.
pub struct ConsolePrompter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl ConsolePrompter<BufReader<Stdin>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_reply(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Interaction for ConsolePrompter<R, W> {
    fn pick_commit(&mut self, prompt: &str, commits: &[CommitInfo]) -> Result<Option<CommitInfo>> {
        writeln!(self.output)?;
        for (i, commit) in commits.iter().enumerate() {
            writeln!(
                self.output,
                "{:>3}. {} {} {}",
                i + 1,
                commit.date,
                commit.short_hash(),
                commit.message
            )?;
        }

        loop {
            write!(self.output, "{} (1-{}, empty to cancel): ", prompt, commits.len())?;
            self.output.flush()?;

            let Some(reply) = self.read_reply()? else {
                return Ok(None);
            };
            if reply.is_empty() {
                return Ok(None);
            }
            match reply.parse::<usize>() {
                Ok(n) if (1..=commits.len()).contains(&n) => {
                    return Ok(Some(commits[n - 1].clone()))
                }
                _ => writeln!(self.output, "Invalid selection")?,
            }
        }
    }

    fn input(&mut self, prompt: &str, prefill: &str) -> Result<Option<String>> {
        if prefill.is_empty() {
            write!(self.output, "{prompt}: ")?;
        } else {
            write!(self.output, "{prompt} [{prefill}]: ")?;
        }
        self.output.flush()?;

        Ok(self.read_reply()?.map(|reply| {
            if reply.is_empty() {
                prefill.to_string()
            } else {
                reply
            }
        }))
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{prompt} [y/N]: ")?;
        self.output.flush()?;
        Ok(matches!(
            self.read_reply()?.as_deref(),
            Some("y") | Some("Y") | Some("yes")
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn commits() -> Vec<CommitInfo> {
        (0..3)
            .map(|i| CommitInfo {
                hash: format!("{i}945ab9c752534e733c38ba0109dc3b741f0a6eb"),
                date: "2026-08-01".to_string(),
                message: format!("commit {i}"),
            })
            .collect()
    }

    fn prompter(input: &str) -> ConsolePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        ConsolePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn pick_commit_by_number() {
        let mut p = prompter("2\n");
        let picked = p.pick_commit("Select starting commit", &commits()).unwrap();
        assert_eq!(picked.unwrap().message, "commit 1");
    }

    #[test]
    fn pick_commit_reprompts_on_invalid_input() {
        let mut p = prompter("99\nabc\n3\n");
        let picked = p.pick_commit("Select ending commit", &commits()).unwrap();
        assert_eq!(picked.unwrap().message, "commit 2");
        assert!(String::from_utf8(p.output).unwrap().contains("Invalid selection"));
    }

    #[test]
    fn pick_commit_empty_cancels() {
        let mut p = prompter("\n");
        assert_eq!(p.pick_commit("Select", &commits()).unwrap(), None);

        // EOF cancels too.
        let mut p = prompter("");
        assert_eq!(p.pick_commit("Select", &commits()).unwrap(), None);
    }

    #[test]
    fn input_falls_back_to_prefill() {
        let mut p = prompter("\n");
        assert_eq!(
            p.input("API key", "********").unwrap().as_deref(),
            Some("********")
        );

        let mut p = prompter("sk-new\n");
        assert_eq!(p.input("API key", "********").unwrap().as_deref(), Some("sk-new"));
    }

    #[test]
    fn input_eof_is_dismissal() {
        let mut p = prompter("");
        assert_eq!(p.input("Describe the issue", "").unwrap(), None);
    }

    #[test]
    fn confirm_defaults_to_no() {
        assert!(prompter("y\n").confirm("Sure?").unwrap());
        assert!(prompter("yes\n").confirm("Sure?").unwrap());
        assert!(!prompter("n\n").confirm("Sure?").unwrap());
        assert!(!prompter("\n").confirm("Sure?").unwrap());
        assert!(!prompter("").confirm("Sure?").unwrap());
    }
}
