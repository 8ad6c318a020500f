//! Plugin output: exactly one line on stdout.
//!
//! Monitoring frameworks read the first stdout line as the service output,
//! so logs go to stderr and everything here goes through `print_line`.

use std::io::{self, Write};

use rtgquota_core::{Evaluation, Status};

use crate::error::CliError;

/// Status line for a completed check.
pub fn status_line(eval: &Evaluation) -> String {
    eval.to_string()
}

/// Status line for a check that could not run.
///
/// Parser and driver messages can span lines (TOML errors carry a source
/// excerpt), so they are folded onto one.
pub fn error_line(err: &CliError) -> String {
    format!("{}: {}", Status::Unknown, single_line(&err.to_string()))
}

/// Collapse a clap error into one line, dropping the usage block and the
/// "For more information" trailer.
pub fn usage_line(err: &clap::Error) -> String {
    let rendered = err.render().to_string();
    let head = rendered
        .lines()
        .take_while(|line| !line.starts_with("Usage:"))
        .filter(|line| !line.starts_with("For more information"))
        .collect::<Vec<_>>()
        .join("\n");
    let text = single_line(&head);
    let text = text.strip_prefix("error: ").unwrap_or(text.as_str());
    format!("{}: {text}", Status::Unknown)
}

fn single_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write `line` to stdout.
pub fn print_line(line: &str) {
    let mut stdout = io::stdout().lock();
    // A closed stdout leaves nowhere to report to; the exit code still carries the status.
    let _ = writeln!(stdout, "{line}");
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn usage_errors_fit_on_one_line() {
        let Err(err) = Cli::try_parse_from(["check_rtgquota", "-H", "edge1", "-i", "eth0"]) else {
            panic!("missing -r should fail to parse");
        };
        let line = usage_line(&err);
        assert!(line.starts_with("UNKNOWN: "), "{line}");
        assert!(line.contains("--rollover"), "{line}");
        assert!(!line.contains('\n'));
        assert!(!line.contains("Usage:"));
    }

    #[test]
    fn value_errors_drop_the_help_hint() {
        let Err(err) = Cli::try_parse_from(["check_rtgquota", "-H", "a", "-i", "b", "-r", "32"])
        else {
            panic!("-r 32 should fail to parse");
        };
        let line = usage_line(&err);
        assert!(line.contains("32"), "{line}");
        assert!(!line.contains("For more information"), "{line}");
    }

    #[test]
    fn multi_line_errors_are_folded() {
        let err = CliError::Config {
            message: "TOML parse error at line 1\n  |\n1 | [database\n  |  ^\n".into(),
        };
        let line = error_line(&err);
        assert!(!line.contains('\n'), "{line}");
        assert!(line.starts_with("UNKNOWN: Configuration error: TOML parse error"), "{line}");
    }

    #[test]
    fn error_line_is_prefixed_unknown() {
        let err = CliError::Timeout { seconds: 5 };
        assert_eq!(error_line(&err), "UNKNOWN: RTG database timed out after 5s");
    }
}
