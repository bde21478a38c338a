//! Parsing of analyzer reports into structured diagnostics.
//!
//! The analyzer emits one finding per line in the shape
//! `<file>:<line>:<col>: <message> (<category>)`. Everything else in the
//! report (module headers, score summaries, blank lines) is noise and is
//! skipped without complaint.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Diagnostic categories the fixer understands.
///
/// Categories without a remediation end up in [`Category::Unsupported`]
/// and are only reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// `trailing-whitespace`
    TrailingWhitespace,
    /// `missing-final-newline`
    MissingFinalNewline,
    /// `wildcard-import`
    WildcardImport,
    /// `unused-wildcard-import`, resolved together with `wildcard-import`.
    UnusedWildcardImport,
    /// Any other category token, kept verbatim.
    Unsupported(String),
}

impl Category {
    /// The lowercase hyphenated token used by the analyzer.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TrailingWhitespace => "trailing-whitespace",
            Self::MissingFinalNewline => "missing-final-newline",
            Self::WildcardImport => "wildcard-import",
            Self::UnusedWildcardImport => "unused-wildcard-import",
            Self::Unsupported(token) => token,
        }
    }

    /// Whether the fixer has a remediation for this category.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "trailing-whitespace" => Self::TrailingWhitespace,
            "missing-final-newline" => Self::MissingFinalNewline,
            "wildcard-import" => Self::WildcardImport,
            "unused-wildcard-import" => Self::UnusedWildcardImport,
            other => Self::Unsupported(other.to_owned()),
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single finding reported by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Line index (0-based).
    pub line: usize,
    /// Column as printed by the analyzer.
    pub column: usize,
    /// Finding category.
    pub category: Category,
}

impl Diagnostic {
    /// Create a new diagnostic.
    #[must_use]
    pub fn new(line: usize, column: usize, category: Category) -> Self {
        Self {
            line,
            column,
            category,
        }
    }
}

/// The file name must start the line or follow whitespace or a path
/// separator, so `pkg/data.py` is not taken for `a.py`.
fn report_line_re(file_name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?:^|[\s/\\]){}:([0-9]+):([0-9]+):.+\(([a-z\-]+)\)$",
        regex::escape(file_name)
    ))
}

/// Parse an analyzer report into diagnostics for `file_name`.
///
/// Lines that do not look like a finding for `file_name` are skipped. The
/// returned diagnostics keep report order, duplicates included.
pub fn parse_report(report: &str, file_name: &str) -> Vec<Diagnostic> {
    let re = match report_line_re(file_name) {
        Ok(re) => re,
        Err(e) => {
            debug!(file_name, error = %e, "cannot build report pattern");
            return Vec::new();
        }
    };

    let mut diagnostics = Vec::new();
    for message in report.lines() {
        let Some(caps) = re.captures(message) else {
            continue;
        };

        // Analyzer lines are 1-based; a zero line has no 0-based index.
        let Some(line) = caps[1]
            .parse::<usize>()
            .ok()
            .and_then(|l| l.checked_sub(1))
        else {
            debug!(message, "skipping report line with unusable line number");
            continue;
        };
        let Ok(column) = caps[2].parse::<usize>() else {
            continue;
        };
        let category = caps[3].parse::<Category>().unwrap_or_else(|e| match e {});

        diagnostics.push(Diagnostic::new(line, column, category));
    }

    debug!(file_name, count = diagnostics.len(), "parsed analyzer report");
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_single_line() {
        let report = "file.py:12:4: Trailing whitespace (trailing-whitespace)";
        let diags = parse_report(report, "file.py");
        assert_eq!(
            diags,
            vec![Diagnostic::new(11, 4, Category::TrailingWhitespace)]
        );
    }

    #[test]
    fn test_skips_noise() {
        let report = "\
************* Module sample
sample.py:3:0: C0303: Trailing whitespace (trailing-whitespace)
sample.py:7:0: this line has no category
-----------------------------------
Your code has been rated at 5.00/10
";
        let diags = parse_report(report, "sample.py");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 2);
    }

    #[test]
    fn test_other_file_is_ignored() {
        let report = "other.py:3:0: C0303: Trailing whitespace (trailing-whitespace)";
        assert!(parse_report(report, "sample.py").is_empty());
    }

    #[test]
    fn test_file_name_suffix_of_other_path_is_ignored() {
        let report = "\
pkg/data.py:3:0: C0303: Trailing whitespace (trailing-whitespace)
pkg\\data.py:4:0: C0303: Trailing whitespace (trailing-whitespace)
";
        assert!(parse_report(report, "a.py").is_empty());
    }

    #[test]
    fn test_file_name_after_directory_is_accepted() {
        let report = "\
src/a.py:3:0: C0303: Trailing whitespace (trailing-whitespace)
a.py:5:0: C0304: Final newline missing (missing-final-newline)
";
        let lines: Vec<usize> = parse_report(report, "a.py").iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![2, 4]);
    }

    #[test]
    fn test_file_name_is_escaped() {
        // `.` in the file name must not match an arbitrary character.
        let report = "sampleXpy:3:0: C0303: Trailing whitespace (trailing-whitespace)";
        assert!(parse_report(report, "sample.py").is_empty());
    }

    #[test]
    fn test_keeps_order_and_duplicates() {
        let report = "\
a.py:9:0: W0401: Wildcard import mod (wildcard-import)
a.py:2:0: C0303: Trailing whitespace (trailing-whitespace)
a.py:2:0: C0303: Trailing whitespace (trailing-whitespace)
";
        let diags = parse_report(report, "a.py");
        let lines: Vec<usize> = diags.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![8, 1, 1]);
        assert_eq!(diags[0].category, Category::WildcardImport);
    }

    #[test]
    fn test_zero_line_is_skipped() {
        let report = "a.py:0:0: C0114: Missing module docstring (missing-module-docstring)";
        assert!(parse_report(report, "a.py").is_empty());
    }

    #[test]
    fn test_unsupported_category_is_kept() {
        let report = "a.py:1:0: W0611: Unused import os (unused-import)";
        let diags = parse_report(report, "a.py");
        assert_eq!(
            diags[0].category,
            Category::Unsupported("unused-import".to_owned())
        );
        assert!(!diags[0].category.is_supported());
    }

    #[test]
    fn test_crlf_report() {
        let report = "a.py:4:2: C0303: Trailing whitespace (trailing-whitespace)\r\n";
        let diags = parse_report(report, "a.py");
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_category_round_trip_through_display() {
        for token in [
            "trailing-whitespace",
            "missing-final-newline",
            "wildcard-import",
            "unused-wildcard-import",
            "line-too-long",
        ] {
            let category: Category = token.parse().unwrap();
            assert_eq!(category.to_string(), token);
        }
    }
}
