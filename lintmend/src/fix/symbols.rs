//! Exported-symbol discovery for wildcard-imported modules.
//!
//! The resolver only needs "which names does module `m` export"; how that
//! question is answered lives behind [`SymbolLookup`]. The default lookup
//! reads the module's source file and scrapes top-level declaration
//! headers with a [`DeclarationGrammar`].

use super::error::ResolveError;
use crate::constants::{get_python_declaration_re, DEFAULT_SOURCE_EXTENSION};
use crate::utils::module_file_path;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// `class Name`
    Class,
    /// `def name` / `async def name`
    Function,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class => f.write_str("class"),
            Self::Function => f.write_str("function"),
        }
    }
}

/// A name a module exposes through `from module import *`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExportedSymbol {
    /// Declaration kind.
    pub kind: SymbolKind,
    /// Identifier.
    pub name: String,
}

impl ExportedSymbol {
    /// Create a new symbol.
    pub fn new(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Source of exported symbols, keyed by dotted module path.
pub trait SymbolLookup {
    /// Symbols exported by `module_path`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::ModuleNotFound`] when the module cannot be
    /// located, or another [`ResolveError`] if it cannot be read.
    fn exported_symbols(&self, module_path: &str) -> Result<Vec<ExportedSymbol>, ResolveError>;
}

/// Regex-driven scanner for declaration headers.
///
/// The pattern must have a `kind` group (`class`, `def` or `async def`) and
/// a `name` group.
#[derive(Debug, Clone)]
pub struct DeclarationGrammar {
    pattern: Regex,
}

impl DeclarationGrammar {
    /// Grammar for a custom pattern.
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Top-level `class` / `def` / `async def` headers in Python source.
    pub fn python() -> Self {
        Self::new(get_python_declaration_re().clone())
    }

    /// Scan `source`, keeping the first occurrence of each symbol.
    pub fn scan(&self, source: &str) -> Vec<ExportedSymbol> {
        let mut seen = FxHashSet::default();
        let mut symbols = Vec::new();

        for caps in self.pattern.captures_iter(source) {
            let (Some(kind), Some(name)) = (caps.name("kind"), caps.name("name")) else {
                continue;
            };
            let kind = if kind.as_str() == "class" {
                SymbolKind::Class
            } else {
                SymbolKind::Function
            };
            let symbol = ExportedSymbol::new(kind, name.as_str());
            if seen.insert(symbol.clone()) {
                symbols.push(symbol);
            }
        }

        symbols
    }
}

impl Default for DeclarationGrammar {
    fn default() -> Self {
        Self::python()
    }
}

/// Looks modules up as files under a root directory.
#[derive(Debug, Clone)]
pub struct FileSymbolLookup {
    root: PathBuf,
    extension: String,
    grammar: DeclarationGrammar,
}

impl FileSymbolLookup {
    /// Lookup rooted at `root` using the default extension and grammar.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_SOURCE_EXTENSION.to_owned(),
            grammar: DeclarationGrammar::default(),
        }
    }

    /// Use a different source file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Use a different declaration grammar.
    #[must_use]
    pub fn with_grammar(mut self, grammar: DeclarationGrammar) -> Self {
        self.grammar = grammar;
        self
    }

    /// Root directory modules are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that `module_path` resolves to.
    pub fn module_file(&self, module_path: &str) -> PathBuf {
        module_file_path(&self.root, module_path, &self.extension)
    }
}

impl SymbolLookup for FileSymbolLookup {
    fn exported_symbols(&self, module_path: &str) -> Result<Vec<ExportedSymbol>, ResolveError> {
        let path = self.module_file(module_path);
        if !path.is_file() {
            return Err(ResolveError::ModuleNotFound {
                module: module_path.to_owned(),
                path,
            });
        }

        let source = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
            path: path.clone(),
            source,
        })?;
        let symbols = self.grammar.scan(&source);
        debug!(
            module = module_path,
            path = %path.display(),
            count = symbols.len(),
            "collected exported symbols"
        );
        Ok(symbols)
    }
}

/// In-memory lookup, for callers that already know the module contents.
#[derive(Debug, Clone, Default)]
pub struct StaticSymbolLookup {
    modules: FxHashMap<String, Vec<ExportedSymbol>>,
}

impl StaticSymbolLookup {
    /// Empty lookup.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the symbols of `module_path`.
    #[must_use]
    pub fn with_module(
        mut self,
        module_path: impl Into<String>,
        symbols: impl IntoIterator<Item = ExportedSymbol>,
    ) -> Self {
        self.modules
            .insert(module_path.into(), symbols.into_iter().collect());
        self
    }
}

impl SymbolLookup for StaticSymbolLookup {
    fn exported_symbols(&self, module_path: &str) -> Result<Vec<ExportedSymbol>, ResolveError> {
        self.modules
            .get(module_path)
            .cloned()
            .ok_or_else(|| ResolveError::ModuleNotFound {
                module: module_path.to_owned(),
                path: PathBuf::from(module_path),
            })
    }
}
