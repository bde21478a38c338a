//! Path helpers shared by the buffer, the resolver and the CLI.

use std::path::{Path, PathBuf};

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes
/// - Strips a leading "./" prefix
///
/// # Examples
/// ```
/// use std::path::Path;
/// use lintmend::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\pkg\\mod.py")), "pkg/mod.py");
/// assert_eq!(normalize_display_path(Path::new("./src/main.py")), "src/main.py");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Output path for a fixed file: `suffix` goes right before the extension.
///
/// # Examples
/// ```
/// use std::path::{Path, PathBuf};
/// use lintmend::utils::default_output_path;
///
/// assert_eq!(default_output_path(Path::new("src/app.py"), "_new"), PathBuf::from("src/app_new.py"));
/// assert_eq!(default_output_path(Path::new("Makefile"), "_new"), PathBuf::from("Makefile_new"));
/// ```
#[must_use]
pub fn default_output_path(original: &Path, suffix: &str) -> PathBuf {
    let stem = original
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match original.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    original.with_file_name(file_name)
}

/// File that a dotted module path refers to, e.g. `pkg.mod` →
/// `<root>/pkg/mod.<extension>`.
#[must_use]
pub fn module_file_path(root: &Path, module_path: &str, extension: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in module_path.split('.') {
        path.push(segment);
    }
    path.set_extension(extension);
    path
}
