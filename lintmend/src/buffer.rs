//! Line-indexed, editable copy of the file under repair.

use crate::utils::default_output_path;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Errors raised by [`SourceBuffer`] operations.
#[derive(Debug, thiserror::Error)]
pub enum BufferError {
    /// A line was requested past the end of the buffer.
    #[error("line index {index} is out of range (buffer has {len} lines)")]
    OutOfRange {
        /// Requested 0-based index.
        index: usize,
        /// Current number of lines.
        len: usize,
    },
    /// Reading or writing the file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// In-memory lines of a source file.
///
/// Every line keeps its terminator, so joining the lines reproduces the
/// file byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    path: PathBuf,
    lines: Vec<String>,
}

/// Split text after every `\n`, keeping the terminators.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_owned).collect()
}

/// Split a line into its content and its terminator (`"\r\n"`, `"\n"` or `""`).
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, &line[content.len()..])
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, &line[content.len()..])
    } else {
        (line, "")
    }
}

impl SourceBuffer {
    /// Read `path` into a buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Io`] if the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BufferError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_source(path, &text))
    }

    /// Build a buffer for `path` from text already in memory.
    pub fn from_source(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: split_lines(text),
        }
    }

    /// A buffer for the same file with different lines.
    #[must_use]
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        Self {
            path: self.path.clone(),
            lines,
        }
    }

    /// Path the buffer was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All lines, terminators included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the buffer holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Line at index `i`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if `i` is not an existing index.
    pub fn get(&self, i: usize) -> Result<&str, BufferError> {
        self.lines
            .get(i)
            .map(String::as_str)
            .ok_or(BufferError::OutOfRange {
                index: i,
                len: self.lines.len(),
            })
    }

    /// Overwrite line `i`, or append `line` when `i` is past the end.
    ///
    /// Appending is how a trailing newline gets added: callers pass
    /// `self.len()` as the index.
    pub fn replace(&mut self, i: usize, line: impl Into<String>) {
        let line = line.into();
        match self.lines.get_mut(i) {
            Some(slot) => *slot = line,
            None => self.lines.push(line),
        }
    }

    /// Joined contents of the buffer.
    pub fn contents(&self) -> String {
        self.lines.concat()
    }

    /// Write the whole buffer in a single write.
    ///
    /// Without an explicit `path` the output goes next to the original
    /// file with `suffix` inserted before the extension.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Io`] if the file cannot be written.
    pub fn persist(&self, path: Option<&Path>, suffix: &str) -> Result<PathBuf, BufferError> {
        let target = path.map_or_else(
            || default_output_path(&self.path, suffix),
            Path::to_path_buf,
        );
        fs::write(&target, self.contents()).map_err(|source| BufferError::Io {
            path: target.clone(),
            source,
        })?;
        info!(path = %target.display(), lines = self.lines.len(), "wrote fixed source");
        Ok(target)
    }
}
