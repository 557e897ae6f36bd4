use std::io::Write;

use crate::error::Result;

/// One rendered analysis. The text comes back from the model opaque and is
/// shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub issue: String,
    pub from_hash: String,
    pub to_hash: String,
    pub analysis: String,
}

impl AnalysisReport {
    pub fn render(&self) -> String {
        let mut output = String::new();

        output.push_str("\n# Issue Analysis\n\n");
        output.push_str(&format!("**Issue:** {}\n\n", self.issue));
        output.push_str(&format!(
            "**Commit range:** `{}..{}`\n\n",
            short(&self.from_hash),
            short(&self.to_hash)
        ));
        output.push_str("## Analysis\n\n");
        output.push_str(&self.analysis);
        if !self.analysis.ends_with('\n') {
            output.push('\n');
        }

        output
    }
}

fn short(hash: &str) -> &str {
    &hash[..7.min(hash.len())]
}

/// The single result surface. A second `show` replaces the current report
/// instead of opening another surface.
pub struct ResultView<W: Write> {
    output: W,
    current: Option<AnalysisReport>,
}

impl<W: Write> ResultView<W> {
    pub fn new(output: W) -> Self {
        Self {
            output,
            current: None,
        }
    }

    pub fn show(&mut self, analysis: &str, issue: &str, from: &str, to: &str) -> Result<()> {
        let report = AnalysisReport {
            issue: issue.to_string(),
            from_hash: from.to_string(),
            to_hash: to.to_string(),
            analysis: analysis.to_string(),
        };

        self.output.write_all(report.render().as_bytes())?;
        self.output.flush()?;
        self.current = Some(report);
        Ok(())
    }

    pub fn current(&self) -> Option<&AnalysisReport> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_keeps_the_analysis_verbatim() {
        let report = AnalysisReport {
            issue: "login fails after 5pm".to_string(),
            from_hash: "1945ab9c752534e733c38ba0109dc3b741f0a6eb".to_string(),
            to_hash: "c460aeb7fb2d109c17e43de0ce681faec0b7374d".to_string(),
            analysis: "root cause: X\nline two".to_string(),
        };

        let rendered = report.render();
        assert!(rendered.contains("root cause: X\nline two"));
        assert!(rendered.contains("login fails after 5pm"));
        assert!(rendered.contains("`1945ab9..c460aeb`"));

        // Idempotent: rendering is a pure function of the report.
        assert_eq!(rendered, report.render());
    }

    #[test]
    fn second_show_replaces_the_surface() {
        let mut view = ResultView::new(Vec::new());
        view.show("first analysis", "issue one", "aaaaaaa", "bbbbbbb")
            .unwrap();
        view.show("second analysis", "issue two", "ccccccc", "ddddddd")
            .unwrap();

        let current = view.current().expect("a current report");
        assert_eq!(current.analysis, "second analysis");
        assert_eq!(current.issue, "issue two");
    }
}
