//! Loading allowlist address files.

use std::path::Path;

use allowlist_core::base::{Address, parse_address_list};
use eyre::{Context as _, ensure};
use tracing::info;

/// Load addresses from a file.
///
/// Files ending in `.json` hold a JSON array of address strings; anything else is
/// a newline separated list (blank lines and `#` comments skipped).
///
/// # Errors
/// Returns an error if the file cannot be read, an entry is not a valid address,
/// or the list is empty.
pub(super) async fn load_addresses(path: &Path) -> eyre::Result<Vec<Address>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read address list {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let addresses = if is_json {
        parse_json_addresses(&contents)
    } else {
        parse_address_list(&contents).map_err(eyre::Report::from)
    }
    .with_context(|| format!("Invalid address list {}", path.display()))?;

    ensure!(!addresses.is_empty(), "Address list {} is empty", path.display());
    info!(count = addresses.len(), file = ?path, "Loaded addresses");
    Ok(addresses)
}

fn parse_json_addresses(contents: &str) -> eyre::Result<Vec<Address>> {
    let entries: Vec<String> =
        serde_json::from_str(contents).context("Expected a JSON array of address strings")?;
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .parse()
                .with_context(|| format!("Invalid address at index {index}"))
        })
        .collect()
}
