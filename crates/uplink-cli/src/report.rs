//! Console reporter: one line per endpoint plus a summary.

use std::fmt::Write as _;

use uplink_core::{Outcome, RunResult};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Renders a [`RunResult`] for the terminal.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    pub use_color: bool,
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(use_color: bool, verbose: bool) -> Self {
        Self { use_color, verbose }
    }

    fn paint<'a>(&self, color: &'a str) -> &'a str {
        if self.use_color { color } else { "" }
    }

    /// A single result line: glyph, URL, and in verbose mode the status
    /// or error plus latency.
    pub fn format_outcome(&self, outcome: &Outcome) -> String {
        let (glyph, color) = if outcome.success {
            ("✓", GREEN)
        } else {
            ("✗", RED)
        };

        let mut line = format!(
            "{}{glyph}{} {}",
            self.paint(color),
            self.paint(RESET),
            outcome.url
        );

        if self.verbose {
            let detail = outcome.detail().unwrap_or_default();
            let _ = write!(
                line,
                " {}[{detail}] {}ms{}",
                self.paint(DIM),
                outcome.duration_ms,
                self.paint(RESET)
            );
        }
        line
    }

    pub fn format_summary(&self, result: &RunResult) -> String {
        let color = if result.all_healthy() { GREEN } else { RED };
        format!(
            "{}{}/{} healthy{}",
            self.paint(color),
            result.healthy_count(),
            result.total_count(),
            self.paint(RESET)
        )
    }

    pub fn render(&self, result: &RunResult) -> String {
        let mut output = String::new();
        for outcome in result.outcomes() {
            output.push_str(&self.format_outcome(outcome));
            output.push('\n');
        }
        output.push_str(&self.format_summary(result));
        output
    }
}
