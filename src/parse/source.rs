use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::error::{ParseError, Result};

/// A loaded `pci.ids` database, decoded as text.
#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
    /// SHA-256 hex digest of the raw bytes as read.
    sha256: String,
}

impl SourceFile {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::UnreadableInput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_vec(path.to_path_buf(), bytes))
    }

    /// Create a SourceFile from raw bytes. Invalid UTF-8 is replaced with
    /// U+FFFD.
    pub fn from_vec(path: PathBuf, bytes: Vec<u8>) -> Self {
        let sha256 = compute_content_hash(&bytes);
        let content = match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };
        Self {
            path,
            content,
            sha256,
        }
    }

    /// Create a SourceFile from a string, using the given path for display purposes.
    pub fn from_string(path: PathBuf, content: String) -> Self {
        let sha256 = compute_content_hash(content.as_bytes());
        Self {
            path,
            content,
            sha256,
        }
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn path_str(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }

    /// Lines with their 1-indexed numbers. Both `\n` and `\r\n` end a line.
    pub fn lines(&self) -> impl Iterator<Item = (usize, &str)> {
        numbered_lines(&self.content)
    }
}

pub(crate) fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
}

fn compute_content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let hash = hasher.finalize();
    format!("{:x}", hash)
}
