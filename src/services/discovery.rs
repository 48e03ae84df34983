//! Candidate document discovery.
//!
//! Expands glob patterns (with recursive `**`) under a base directory. Hidden
//! entries are only matched by patterns that name them explicitly.

use camino::{Utf8Path, Utf8PathBuf};
use glob::{MatchOptions, Pattern};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Invalid discovery pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Find every regular file matching `patterns` under `base_dir`.
///
/// The result is sorted. With `deduplicate`, a file matched by several
/// patterns appears once; otherwise it appears once per matching pattern.
///
/// Entries that cannot be read or whose paths are not UTF-8 are logged and
/// skipped.
///
/// # Errors
/// Returns [`DiscoveryError::InvalidPattern`] for a malformed pattern.
pub fn discover_documents(
    base_dir: &Utf8Path,
    patterns: &[String],
    deduplicate: bool,
) -> Result<Vec<Utf8PathBuf>, DiscoveryError> {
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let escaped_base = Pattern::escape(base_dir.as_str());

    let mut documents = Vec::new();

    for pattern in patterns {
        let full_pattern = Utf8Path::new(&escaped_base).join(pattern);
        let entries = glob::glob_with(full_pattern.as_str(), options).map_err(|source| {
            DiscoveryError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            }
        })?;

        let names_hidden = pattern.starts_with('.') || pattern.contains("/.");

        let before = documents.len();
        for entry in entries {
            let path = match entry {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry while matching {}: {}", pattern, e);
                    continue;
                }
            };

            let path = match Utf8PathBuf::from_path_buf(path) {
                Ok(path) => path,
                Err(path) => {
                    tracing::warn!("Skipping non UTF-8 path: {}", path.display());
                    continue;
                }
            };

            if !names_hidden && is_hidden(base_dir, &path) {
                tracing::trace!("Skipping hidden path {}", path);
                continue;
            }

            if path.is_file() {
                documents.push(path);
            }
        }

        tracing::debug!("Pattern {} matched {} documents", pattern, documents.len() - before);
    }

    documents.sort();

    if deduplicate {
        let before = documents.len();
        documents.dedup();
        let removed = before - documents.len();
        if removed > 0 {
            tracing::debug!("Removed {} duplicate matches", removed);
        }
    }

    Ok(documents)
}

/// Any component below `base_dir` starting with a dot
fn is_hidden(base_dir: &Utf8Path, path: &Utf8Path) -> bool {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .components()
        .any(|c| c.as_str().starts_with('.') && c.as_str() != "." && c.as_str() != "..")
}
