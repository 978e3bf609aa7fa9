//! Test helpers for the skymap workspace
//!
//! Rendered maps and catalog fixtures written by tests land in a single
//! `test_output` directory at the workspace root so they can be inspected
//! after a run.

use once_cell::sync::Lazy;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for test helper operations
#[derive(thiserror::Error, Debug)]
pub enum TestHelperError {
    #[error("workspace root not found: {0}")]
    WorkspaceRootNotFound(String),
    #[error("failed to write fixture {path}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Walk up from the current directory to the Cargo.toml declaring `[workspace]`.
pub fn find_workspace_root() -> Result<PathBuf, TestHelperError> {
    let mut dir = env::current_dir().map_err(|e| {
        TestHelperError::WorkspaceRootNotFound(format!("no current directory: {e}"))
    })?;

    loop {
        let manifest = dir.join("Cargo.toml");
        if let Ok(content) = fs::read_to_string(&manifest) {
            if content.contains("[workspace]") {
                return Ok(dir);
            }
        }

        if !dir.pop() {
            return Err(TestHelperError::WorkspaceRootNotFound(
                "no Cargo.toml with [workspace] above the current directory".to_string(),
            ));
        }
    }
}

static WORKSPACE_ROOT: Lazy<PathBuf> =
    Lazy::new(|| find_workspace_root().expect("Failed to find workspace root directory"));

/// Directory for test artifacts, created on first use.
pub fn get_output_dir() -> PathBuf {
    let output_dir = WORKSPACE_ROOT.join("test_output");
    fs::create_dir_all(&output_dir).expect("Failed to create output directory");
    output_dir
}

/// Path of `path` inside the test output directory.
pub fn output_path<P: AsRef<Path>>(path: P) -> PathBuf {
    get_output_dir().join(path)
}

/// Build a fixed-column catalog line of `len` bytes.
///
/// Each field text is placed at its byte offset with a `|` separator in the
/// column before it; every other column is a space.
pub fn fixed_column_line(len: usize, fields: &[(usize, &str)]) -> String {
    let mut line = vec![b' '; len];
    for &(offset, text) in fields {
        line[offset - 1] = b'|';
        line[offset..offset + text.len()].copy_from_slice(text.as_bytes());
    }
    String::from_utf8(line).expect("fixture text is UTF-8")
}

/// Write catalog lines to `path`, one per line, and return the path.
///
/// Lines are written as given, so fixtures can include malformed records.
pub fn write_catalog_fixture<P, I, L>(path: P, lines: I) -> Result<PathBuf, TestHelperError>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let path = path.as_ref().to_path_buf();
    let mut content = Vec::new();
    for line in lines {
        content.extend_from_slice(line.as_ref());
        content.push(b'\n');
    }

    fs::write(&path, content).map_err(|source| TestHelperError::Fixture {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
