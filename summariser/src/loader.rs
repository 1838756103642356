use log::{debug, error, warn};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::Path;

/// A report file as read from disk, before any schema is applied
#[derive(Debug, Clone, PartialEq)]
pub enum RawReport {
    /// The file does not exist, usually because the producing runner did not run
    Absent,
    /// The file exists but could not be read or decoded
    LoadError { message: String },
    /// The decoded JSON document
    Loaded(Value),
}

/// An error type for [`read_json`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Load a JSON report from the given path.
///
/// Never fails, problems are logged and reported through the returned [`RawReport`].
pub fn load_report<P: AsRef<Path>>(path: P) -> RawReport {
    let path = path.as_ref();
    match read_json(path) {
        Ok(Some(value)) => {
            debug!("Loaded report from {}", path.display());
            RawReport::Loaded(value)
        }
        Ok(None) => {
            warn!(
                "Report file not found: {}. It will be treated as having no results.",
                path.display()
            );
            RawReport::Absent
        }
        Err(e) => {
            error!("Failed to read or parse JSON report {}: {e}", path.display());
            RawReport::LoadError {
                message: e.to_string(),
            }
        }
    }
}

/// Read and decode a JSON file, returning `None` if it does not exist.
fn read_json(path: &Path) -> Result<Option<Value>, LoadError> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let value = serde_json::from_reader(std::io::BufReader::new(file))?;
    Ok(Some(value))
}
