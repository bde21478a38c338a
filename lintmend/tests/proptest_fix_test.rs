//! Property-based tests for the line-level fixers.
//!
//! These tests verify that:
//! - Stripping trailing whitespace is idempotent and never drops a line break
//! - Appending a final newline preserves every existing line
//! - A wildcard-imported name is qualified exactly once per usage
#![allow(clippy::unwrap_used)]

use lintmend::buffer::SourceBuffer;
use lintmend::diagnostics::{parse_report, Category, Diagnostic};
use lintmend::fix::{
    find_usages, strip_trailing_whitespace, BoundaryMode, ExportedSymbol, FixDispatcher,
    StaticSymbolLookup, SymbolKind, WildcardResolver,
};
use proptest::prelude::*;

/// Strategy for a single source line, with or without a terminator.
fn arb_line() -> impl Strategy<Value = String> {
    (
        prop::string::string_regex(r"[a-z_ =()0-9]{0,20}").unwrap(),
        prop::string::string_regex(r"[ \t]{0,6}").unwrap(),
        prop::sample::select(vec!["", "\n", "\r\n"]),
    )
        .prop_map(|(content, trailing, terminator)| format!("{content}{trailing}{terminator}"))
}

/// Strategy for a whole file, possibly missing its final newline.
fn arb_source() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_line(), 1..8).prop_map(|lines| {
        lines
            .iter()
            .map(|l| l.trim_end_matches(['\r', '\n']).to_owned())
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn dispatcher(source: &str) -> FixDispatcher<StaticSymbolLookup> {
    FixDispatcher::new(
        SourceBuffer::from_source("p.py", source),
        WildcardResolver::new(StaticSymbolLookup::new()),
    )
}

proptest! {
    /// Stripping twice yields the same line as stripping once.
    #[test]
    fn strip_is_idempotent(line in arb_line()) {
        let once = strip_trailing_whitespace(&line);
        let twice = strip_trailing_whitespace(&once);
        prop_assert_eq!(&once, &twice, "strip should be idempotent");
    }

    /// A stripped line is never empty and always ends in a line break when
    /// it was whitespace only.
    #[test]
    fn strip_keeps_line_break(line in arb_line()) {
        let stripped = strip_trailing_whitespace(&line);
        prop_assert!(!stripped.is_empty());

        let content = stripped.trim_end_matches(['\r', '\n']);
        prop_assert_eq!(content, content.trim_end());
        if line.trim().is_empty() {
            prop_assert!(stripped == "\n" || stripped == "\r\n");
        }
        if line.ends_with('\n') {
            prop_assert!(stripped.ends_with('\n'));
        }
    }

    /// Fixing every line of a file, then fixing the result again, changes nothing.
    #[test]
    fn whitespace_fix_is_idempotent(source in arb_source()) {
        let mut first = dispatcher(&source);
        let diagnostics: Vec<Diagnostic> = (0..first.buffer().len())
            .map(|i| Diagnostic::new(i, 0, Category::TrailingWhitespace))
            .collect();
        first.apply_all(&diagnostics).unwrap();
        let once = first.buffer().contents();

        let mut second = dispatcher(&once);
        let diagnostics: Vec<Diagnostic> = (0..second.buffer().len())
            .map(|i| Diagnostic::new(i, 0, Category::TrailingWhitespace))
            .collect();
        second.apply_all(&diagnostics).unwrap();

        prop_assert_eq!(once, second.buffer().contents());
    }

    /// Appending a final newline adds exactly one line and keeps the others.
    #[test]
    fn final_newline_preserves_lines(source in arb_source()) {
        let mut fixer = dispatcher(&source);
        let before = fixer.buffer().lines().to_vec();
        fixer
            .apply(&Diagnostic::new(0, 0, Category::MissingFinalNewline))
            .unwrap();

        let after = fixer.buffer().lines();
        prop_assert_eq!(after.len(), before.len() + 1);
        prop_assert_eq!(&after[..before.len()], &before[..]);
        prop_assert_eq!(after[before.len()].as_str(), "\n");
    }

    /// Report lines for the file round through the parser with a 0-based line.
    #[test]
    fn report_line_is_zero_based(line in 1usize..10_000, column in 0usize..200) {
        let report = format!("f.py:{line}:{column}: C0303: msg (trailing-whitespace)");
        let parsed = parse_report(&report, "f.py");
        prop_assert_eq!(
            parsed,
            vec![Diagnostic::new(line - 1, column, Category::TrailingWhitespace)]
        );
    }

    /// A single usage is qualified exactly once.
    #[test]
    fn usage_is_qualified_once(name in prop::string::string_regex(r"[A-Z][a-z]{1,8}").unwrap()) {
        let line = format!("y = {name}()\n");
        prop_assert_eq!(find_usages(&line, &name, BoundaryMode::Both), vec![(4, 4 + name.len())]);

        let lookup = StaticSymbolLookup::new()
            .with_module("pkg", [ExportedSymbol::new(SymbolKind::Class, name.clone())]);
        let resolver = WildcardResolver::new(lookup);
        let buffer = SourceBuffer::from_source("q.py", &format!("from pkg import *\ny = {name}()\n"));
        let resolution = resolver.resolve(&buffer, 0).unwrap();
        prop_assert_eq!(
            resolution.buffer.contents(),
            format!("import pkg\ny = pkg.{name}()\n")
        );
    }
}
