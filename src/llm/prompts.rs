pub const SYSTEM_PROMPT: &str = "You are a skilled software developer analyzing Git changes to find root causes of production issues.";

/// Returned when the model answers with no content at all.
pub const NO_ANALYSIS: &str = "No analysis generated";

/// Fixed template embedding the issue description and the diff verbatim.
/// Large diffs are passed through as-is.
pub fn build_analysis_prompt(diff: &str, issue: &str) -> String {
    format!(
        "Given the following git diff and a description of a production issue, \
identify the most likely cause or suspicious code sections:

Issue:
{issue}

Git diff:
{diff}

Please analyze the changes and provide:
1. The most likely files and line numbers related to the issue
2. Your reasoning for why these changes might have caused the issue
3. Potential solutions or areas to investigate further"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_issue_and_diff_verbatim() {
        let diff = "--- a/login.py\n+++ b/login.py\n+if hour >= 17: deny()\n";
        let prompt = build_analysis_prompt(diff, "login fails after 5pm");

        assert!(prompt.contains("Issue:\nlogin fails after 5pm"));
        assert!(prompt.contains(diff));
        assert!(prompt.contains("most likely files and line numbers"));
    }
}
