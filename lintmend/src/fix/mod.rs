//! Remediation of analyzer diagnostics.
//!
//! - [`FixDispatcher`] walks diagnostics in report order and edits a
//!   [`SourceBuffer`](crate::buffer::SourceBuffer)
//! - [`WildcardResolver`] rewrites `from m import *` and qualifies usages
//! - [`SymbolLookup`] answers which names a module exports
//! - [`LineRewriter`] applies byte-range edits within one line

mod dispatch;
mod error;
mod rewriter;
mod symbols;
mod wildcard;

pub use dispatch::{strip_trailing_whitespace, FixAction, FixDispatcher, FixOutcome};
pub use error::{FixError, ResolveError};
pub use rewriter::{Edit, LineRewriter, RewriteError};
pub use symbols::{
    DeclarationGrammar, ExportedSymbol, FileSymbolLookup, StaticSymbolLookup, SymbolKind,
    SymbolLookup,
};
pub use wildcard::{
    find_usages, BoundaryMode, Resolution, UsageRewrite, WildcardImport, WildcardResolver,
};
