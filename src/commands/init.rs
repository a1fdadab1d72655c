use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory, its `.secrets` subdirectory and an initial `config.json` pointing
/// at `api_url`.
///
/// # Arguments
/// - `expense_home` - The directory that will be the root of the home directory, e.g.
///   `$HOME/expenses`
/// - `api_url` - The base URL of the record store's remote methods.
///
/// # Errors
/// - Returns an error if `api_url` is not a URL or if any file operations fail.
pub async fn init(expense_home: &Path, api_url: &str) -> Result<Out<()>> {
    let config = Config::create(expense_home, api_url)
        .await
        .context("Unable to create the home directory and config")?;
    Ok(format!(
        "Created {}. If the record store needs a bearer token, save it to {}",
        config.config_path().display(),
        config.token_path().display()
    )
    .into())
}
