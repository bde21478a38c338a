//! Routing of diagnostics to remediation actions.

use super::error::FixError;
use super::symbols::SymbolLookup;
use super::wildcard::WildcardResolver;
use crate::buffer::{split_terminator, SourceBuffer};
use crate::diagnostics::{Category, Diagnostic};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// What happened to one diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FixAction {
    /// Trailing whitespace was stripped.
    StrippedWhitespace,
    /// A final newline was appended.
    AppendedNewline,
    /// A wildcard import was converted and its usages qualified.
    ResolvedWildcardImport {
        /// Imported module.
        module: String,
        /// Number of usages rewritten.
        rewrites: usize,
    },
    /// Nothing to do; fixed as a side effect of another diagnostic.
    Skipped,
    /// No automatic fix exists; reported to the operator.
    Advisory,
}

impl FixAction {
    /// Whether the buffer was changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(
            self,
            Self::StrippedWhitespace | Self::AppendedNewline | Self::ResolvedWildcardImport { .. }
        )
    }
}

/// A diagnostic together with the action taken for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixOutcome {
    /// The diagnostic as parsed from the report.
    #[serde(flatten)]
    pub diagnostic: Diagnostic,
    /// Action taken.
    #[serde(flatten)]
    pub action: FixAction,
}

/// Strip trailing whitespace from one line, keeping its terminator.
///
/// A line that is all whitespace becomes a bare line break (its own
/// terminator, or `"\n"` if it had none), never an empty string.
///
/// ```
/// use lintmend::fix::strip_trailing_whitespace;
///
/// assert_eq!(strip_trailing_whitespace("x = 1   \n"), "x = 1\n");
/// assert_eq!(strip_trailing_whitespace("   \t\n"), "\n");
/// assert_eq!(strip_trailing_whitespace("  "), "\n");
/// ```
#[must_use]
pub fn strip_trailing_whitespace(line: &str) -> String {
    let (content, terminator) = split_terminator(line);
    let stripped = content.trim_end();
    if stripped.is_empty() {
        if terminator.is_empty() {
            "\n".to_owned()
        } else {
            terminator.to_owned()
        }
    } else {
        format!("{stripped}{terminator}")
    }
}

/// Applies diagnostics, in report order, to a single buffer.
#[derive(Debug)]
pub struct FixDispatcher<L> {
    buffer: SourceBuffer,
    resolver: WildcardResolver<L>,
}

impl<L: SymbolLookup> FixDispatcher<L> {
    /// Dispatcher owning `buffer` for the duration of the run.
    pub fn new(buffer: SourceBuffer, resolver: WildcardResolver<L>) -> Self {
        Self { buffer, resolver }
    }

    /// Current state of the buffer.
    pub fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    /// Give the buffer back without writing it.
    pub fn into_buffer(self) -> SourceBuffer {
        self.buffer
    }

    /// Apply one diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`FixError::Buffer`] if the diagnostic points past the end of
    /// the buffer, or [`FixError::Resolve`] if a wildcard import cannot be
    /// resolved. In both cases the buffer is left as it was.
    pub fn apply(&mut self, diagnostic: &Diagnostic) -> Result<FixAction, FixError> {
        let index = diagnostic.line;
        let action = match &diagnostic.category {
            Category::TrailingWhitespace => {
                let fixed = strip_trailing_whitespace(self.buffer.get(index)?);
                self.buffer.replace(index, fixed);
                FixAction::StrippedWhitespace
            }
            Category::MissingFinalNewline => {
                let end = self.buffer.len();
                self.buffer.replace(end, "\n");
                FixAction::AppendedNewline
            }
            Category::WildcardImport => {
                let resolution = self
                    .resolver
                    .resolve(&self.buffer, index)
                    .map_err(|source| FixError::Resolve {
                        line: index,
                        source,
                    })?;
                self.buffer = resolution.buffer;
                FixAction::ResolvedWildcardImport {
                    module: resolution.module_path,
                    rewrites: resolution.rewrites,
                }
            }
            Category::UnusedWildcardImport => FixAction::Skipped,
            Category::Unsupported(category) => {
                warn!(
                    category = %category,
                    line = index + 1,
                    "no automatic fix for diagnostic"
                );
                FixAction::Advisory
            }
        };

        debug!(
            category = %diagnostic.category,
            line = index + 1,
            ?action,
            "processed diagnostic"
        );
        Ok(action)
    }

    /// Apply every diagnostic in order.
    ///
    /// # Errors
    ///
    /// Stops at the first diagnostic that fails; see [`Self::apply`].
    pub fn apply_all(&mut self, diagnostics: &[Diagnostic]) -> Result<Vec<FixOutcome>, FixError> {
        diagnostics
            .iter()
            .map(|diagnostic| {
                self.apply(diagnostic).map(|action| FixOutcome {
                    diagnostic: diagnostic.clone(),
                    action,
                })
            })
            .collect()
    }

    /// Write the buffer once and consume the dispatcher.
    ///
    /// # Errors
    ///
    /// Returns [`FixError::Buffer`] if the file cannot be written.
    pub fn persist(self, output: Option<&Path>, suffix: &str) -> Result<PathBuf, FixError> {
        Ok(self.buffer.persist(output, suffix)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fix::symbols::{ExportedSymbol, StaticSymbolLookup, SymbolKind};

    fn dispatcher(source: &str) -> FixDispatcher<StaticSymbolLookup> {
        let lookup = StaticSymbolLookup::new()
            .with_module("mod", [ExportedSymbol::new(SymbolKind::Class, "Foo")]);
        FixDispatcher::new(
            SourceBuffer::from_source("a.py", source),
            WildcardResolver::new(lookup),
        )
    }

    #[test]
    fn test_strip_trailing_whitespace_keeps_crlf() {
        assert_eq!(strip_trailing_whitespace("x  \r\n"), "x\r\n");
        assert_eq!(strip_trailing_whitespace(" \r\n"), "\r\n");
        assert_eq!(strip_trailing_whitespace("x = 1 "), "x = 1");
    }

    #[test]
    fn test_trailing_whitespace() {
        let mut d = dispatcher("x = 1   \n  \ny = 2\n");
        d.apply(&Diagnostic::new(0, 7, Category::TrailingWhitespace))
            .unwrap();
        d.apply(&Diagnostic::new(1, 0, Category::TrailingWhitespace))
            .unwrap();
        assert_eq!(d.buffer().contents(), "x = 1\n\ny = 2\n");
    }

    #[test]
    fn test_missing_final_newline_appends() {
        let mut d = dispatcher("a = 1\nb = 2");
        let action = d
            .apply(&Diagnostic::new(1, 0, Category::MissingFinalNewline))
            .unwrap();
        assert_eq!(action, FixAction::AppendedNewline);
        assert_eq!(d.buffer().lines(), ["a = 1\n", "b = 2", "\n"]);
    }

    #[test]
    fn test_unsupported_is_advisory() {
        let mut d = dispatcher("import os\n");
        let before = d.buffer().clone();
        let action = d
            .apply(&Diagnostic::new(
                0,
                0,
                Category::Unsupported("unused-import".to_owned()),
            ))
            .unwrap();
        assert_eq!(action, FixAction::Advisory);
        assert_eq!(d.buffer(), &before);
    }

    #[test]
    fn test_unsupported_past_end_is_not_an_error() {
        let mut d = dispatcher("x = 1\n");
        let action = d
            .apply(&Diagnostic::new(
                40,
                0,
                Category::Unsupported("line-too-long".to_owned()),
            ))
            .unwrap();
        assert_eq!(action, FixAction::Advisory);
    }

    #[test]
    fn test_wildcard_and_unused_wildcard() {
        let mut d = dispatcher("from mod import *\nFoo()\n");
        let outcomes = d
            .apply_all(&[
                Diagnostic::new(0, 0, Category::WildcardImport),
                Diagnostic::new(0, 0, Category::UnusedWildcardImport),
            ])
            .unwrap();
        assert_eq!(
            outcomes[0].action,
            FixAction::ResolvedWildcardImport {
                module: "mod".to_owned(),
                rewrites: 1
            }
        );
        assert_eq!(outcomes[1].action, FixAction::Skipped);
        assert_eq!(d.buffer().contents(), "import mod\nmod.Foo()\n");
    }

    #[test]
    fn test_failed_resolution_leaves_buffer() {
        let mut d = dispatcher("from other import *\nFoo()  \n");
        let before = d.buffer().clone();
        let err = d
            .apply(&Diagnostic::new(0, 0, Category::WildcardImport))
            .unwrap_err();
        assert!(matches!(err, FixError::Resolve { line: 0, .. }));
        assert_eq!(d.buffer(), &before);
    }

    #[test]
    fn test_trailing_whitespace_out_of_range() {
        let mut d = dispatcher("x = 1\n");
        let err = d
            .apply(&Diagnostic::new(3, 0, Category::TrailingWhitespace))
            .unwrap_err();
        assert!(matches!(err, FixError::Buffer(_)));
    }
}
