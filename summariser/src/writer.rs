use dashboard_summary_model::{store_summary_output, SummaryOutput};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// An error type for writing output files.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Write the rendered dashboard, creating missing parent directories and replacing any existing file.
pub fn write_dashboard(path: &Path, html: &str) -> Result<(), WriteError> {
    write_file(path, html.as_bytes())
}

/// Write the summaries as pretty-printed JSON.
pub fn write_summary_output(path: &Path, output: &SummaryOutput) -> anyhow::Result<()> {
    let mut contents = Vec::new();
    store_summary_output(output, &mut contents)?;
    write_file(path, &contents)?;
    Ok(())
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), WriteError> {
    ensure_parent_dir(path)?;
    debug!("Writing {} bytes to {}", contents.len(), path.display());
    fs::write(path, contents).map_err(|source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Ensure the parent directory for a file exists.
fn ensure_parent_dir(path: &Path) -> Result<(), WriteError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
