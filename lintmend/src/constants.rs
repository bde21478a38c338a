use regex::Regex;
use std::sync::OnceLock;

/// Name of the project-local configuration file.
pub const CONFIG_FILENAME: &str = ".lintmend.toml";

/// Name of the Python project manifest that may carry a `[tool.lintmend]` table.
pub const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Suffix inserted before the extension when no output path is given.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_new";

/// Extension used for both the target file and resolved module files.
pub const DEFAULT_SOURCE_EXTENSION: &str = "py";

/// Directory that dotted module paths are resolved against.
pub const DEFAULT_MODULE_ROOT: &str = ".";

/// Regex for a non-relative wildcard import line: `from a.b.c import *`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_wildcard_import_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<indent>[ \t]*)from[ \t]+(?P<module>[A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)[ \t]+import[ \t]+\*[ \t]*(?:#.*)?$",
        )
        .expect("Invalid wildcard import regex pattern")
    })
}

/// Regex for top-level `class`/`def` headers in a Python module.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_python_declaration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"(?m)^(?P<kind>class|def|async[ \t]+def)[ \t]+(?P<name>[A-Za-z_][A-Za-z0-9_]*)")
            .expect("Invalid declaration regex pattern")
    })
}
