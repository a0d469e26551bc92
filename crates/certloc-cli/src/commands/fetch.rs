//! `certloc fetch` - download the SKI-PEM table.

use anyhow::{Context, Result};
use tracing::info;

use certloc_csca::{CscaClient, CscaConfig, Environment};

use crate::args::FetchArgs;

pub async fn run(args: FetchArgs) -> Result<()> {
    let mut config = CscaConfig::from_env();
    if let Some(timeout) = args.timeout {
        config = config.with_timeout_secs(timeout);
    }

    let environment = Environment::from(args.environment);
    let client = CscaClient::new(config)?;
    let table = client.fetch_table(environment).await?;
    let json = table.to_json_pretty()?;

    match &args.out {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write table: {}", path.display()))?;
            info!(path = %path.display(), entries = table.len(), "wrote SKI-PEM table");
        }
        None => println!("{json}"),
    }
    Ok(())
}
