//! Wildcard-import resolution.
//!
//! `from pkg.mod import *` is turned into `import pkg.mod` and every usage
//! of a name exported by `pkg.mod` is qualified as `pkg.mod.<name>`. The
//! resolver works on a copy of the buffer and hands back a complete new
//! buffer, so a failure never leaves a half-rewritten file behind.

use super::error::ResolveError;
use super::rewriter::{Edit, LineRewriter};
use super::symbols::{ExportedSymbol, SymbolLookup};
use crate::buffer::{split_terminator, SourceBuffer};
use crate::constants::get_wildcard_import_re;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

/// Result of matching a line against `from <module> import *`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WildcardImport {
    /// The line is a wildcard import of `module_path`.
    Matched {
        /// Dotted module path.
        module_path: String,
        /// Leading whitespace of the statement.
        indent: String,
    },
    /// The line is something else (including relative imports).
    NoMatch,
}

impl WildcardImport {
    /// Match one line; the terminator may be included.
    pub fn parse(line: &str) -> Self {
        let (content, _) = split_terminator(line);
        match get_wildcard_import_re().captures(content) {
            Some(caps) => Self::Matched {
                module_path: caps["module"].to_owned(),
                indent: caps["indent"].to_owned(),
            },
            None => Self::NoMatch,
        }
    }
}

/// Which identifier boundaries a usage must have to be rewritten.
///
/// In both modes `.` counts as a boundary, so an already qualified
/// `pkg.Foo` is qualified again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Only the character before the name is checked. `FooBar` is
    /// rewritten when `Foo` is exported.
    #[default]
    LeftOnly,
    /// The characters on both sides must be non-identifier characters.
    Both,
}

/// A pending qualification of one usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRewrite {
    /// 0-based line index.
    pub line: usize,
    /// Byte offset of the name within the line.
    pub start: usize,
    /// Name as written in the source.
    pub old_token: String,
    /// Qualified replacement, `<module>.<name>`.
    pub new_token: String,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Rewritten buffer.
    pub buffer: SourceBuffer,
    /// Module that was imported.
    pub module_path: String,
    /// Number of exported symbols found in the module.
    pub symbols: usize,
    /// Number of usages that were qualified.
    pub rewrites: usize,
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte ranges of `name` in `line` that satisfy `mode`.
pub fn find_usages(line: &str, name: &str, mode: BoundaryMode) -> Vec<(usize, usize)> {
    if name.is_empty() {
        return Vec::new();
    }

    line.match_indices(name)
        .map(|(start, _)| (start, start + name.len()))
        .filter(|&(start, end)| {
            let left_ok = line[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !is_identifier_char(c));
            let right_ok = mode == BoundaryMode::LeftOnly
                || line[end..]
                    .chars()
                    .next()
                    .map_or(true, |c| !is_identifier_char(c));
            left_ok && right_ok
        })
        .collect()
}

/// Resolves wildcard imports with symbols from a [`SymbolLookup`].
#[derive(Debug, Clone)]
pub struct WildcardResolver<L> {
    lookup: L,
    boundary: BoundaryMode,
}

impl<L: SymbolLookup> WildcardResolver<L> {
    /// Resolver using `lookup` and left-only boundary checks.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            boundary: BoundaryMode::default(),
        }
    }

    /// Set the boundary mode.
    #[must_use]
    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Current boundary mode.
    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Symbol lookup in use.
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Every usage of `symbols` in `buffer` that will be qualified.
    ///
    /// `import_line` and any other wildcard-import line are skipped. When
    /// two names match at overlapping positions (`Foo` inside `FooBar`
    /// under [`BoundaryMode::LeftOnly`]) only the longer one is kept, so
    /// every returned rewrite is applied exactly once.
    pub fn collect_rewrites(
        &self,
        buffer: &SourceBuffer,
        import_line: usize,
        module_path: &str,
        symbols: &[ExportedSymbol],
    ) -> Vec<UsageRewrite> {
        let mut rewrites = Vec::new();
        for (index, line) in buffer.lines().iter().enumerate() {
            let is_wildcard = matches!(WildcardImport::parse(line), WildcardImport::Matched { .. });
            if index == import_line || is_wildcard {
                continue;
            }

            let mut seen = FxHashSet::default();
            let mut candidates: Vec<(usize, usize, &str)> = Vec::new();
            for symbol in symbols {
                if !seen.insert(symbol.name.as_str()) {
                    continue;
                }
                for (start, end) in find_usages(line, &symbol.name, self.boundary) {
                    candidates.push((start, end, symbol.name.as_str()));
                }
            }
            candidates.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

            let mut last_end = 0;
            for (start, end, name) in candidates {
                if start < last_end {
                    continue;
                }
                rewrites.push(UsageRewrite {
                    line: index,
                    start,
                    old_token: name.to_owned(),
                    new_token: format!("{module_path}.{name}"),
                });
                last_end = end;
            }
        }
        rewrites
    }

    /// Rewrite the wildcard import on line `import_line` and all usages.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Buffer`] if `import_line` is out of range
    /// - [`ResolveError::MalformedWildcardImport`] if the line is not a
    ///   supported wildcard import
    /// - [`ResolveError::ModuleNotFound`] / [`ResolveError::Io`] from the lookup
    pub fn resolve(
        &self,
        buffer: &SourceBuffer,
        import_line: usize,
    ) -> Result<Resolution, ResolveError> {
        let line = buffer.get(import_line)?;
        let WildcardImport::Matched {
            module_path,
            indent,
        } = WildcardImport::parse(line)
        else {
            return Err(ResolveError::MalformedWildcardImport {
                line: import_line,
                text: split_terminator(line).0.to_owned(),
            });
        };

        let symbols = self.lookup.exported_symbols(&module_path)?;
        let rewrites = self.collect_rewrites(buffer, import_line, &module_path, &symbols);
        debug!(
            module = %module_path,
            symbols = symbols.len(),
            rewrites = rewrites.len(),
            "resolving wildcard import"
        );

        let mut by_line: FxHashMap<usize, Vec<&UsageRewrite>> = FxHashMap::default();
        for rewrite in &rewrites {
            by_line.entry(rewrite.line).or_default().push(rewrite);
        }

        let mut lines = buffer.lines().to_vec();
        for (index, line_rewrites) in by_line {
            lines[index] = apply_line_rewrites(&lines[index], &line_rewrites);
        }

        let terminator = split_terminator(line).1;
        lines[import_line] = format!("{indent}import {module_path}{terminator}");

        Ok(Resolution {
            buffer: buffer.with_lines(lines),
            symbols: symbols.len(),
            rewrites: rewrites.len(),
            module_path,
        })
    }
}

/// Qualify the recorded usages of one line.
fn apply_line_rewrites(line: &str, rewrites: &[&UsageRewrite]) -> String {
    let mut rewriter = LineRewriter::new(line);
    rewriter.add_edits(rewrites.iter().map(|r| {
        Edit::new(r.start, r.start + r.old_token.len(), r.new_token.as_str())
    }));

    // Rewrites come from `find_usages` and were made disjoint, so
    // validation cannot fail; keep the line untouched if it ever does.
    rewriter.apply().unwrap_or_else(|_| line.to_owned())
}
