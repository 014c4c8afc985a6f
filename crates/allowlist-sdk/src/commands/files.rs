//! JSON file helpers shared by the commands.

use std::path::Path;

use eyre::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and parse a JSON document.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse as `T`.
pub(super) async fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> eyre::Result<T> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {what} file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {what} JSON from {}", path.display()))
}

/// Serialize `value` as pretty JSON and write it to `path`.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub(super) async fn write_json<T: Serialize>(path: &Path, value: &T) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
