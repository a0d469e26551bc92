//! `certloc csca` - resolve a CSCA certificate by key identifier.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

use certloc_csca::{CscaResolver, TrustAnchorTable};

use crate::args::{CscaArgs, OutputFormat};

#[derive(Serialize)]
struct CscaOutput<'a> {
    ski: &'a str,
    source: String,
    pem: &'a str,
}

pub async fn run(args: CscaArgs) -> Result<()> {
    let development = load_optional(args.dev_table.as_deref()).await?;
    let production = load_optional(args.prod_table.as_deref()).await?;
    let override_table = match &args.override_table {
        Some(path) => Some(
            TrustAnchorTable::load(path)
                .await
                .context("failed to load override table")?,
        ),
        None => None,
    };

    debug!(
        development = development.len(),
        production = production.len(),
        override_supplied = override_table.is_some(),
        "trust anchor tables loaded"
    );

    let resolver = CscaResolver::new(development, production);
    let anchor = resolver.resolve_with_source(&args.ski, override_table.as_ref())?;

    match args.format {
        OutputFormat::Text => println!("{}", anchor.pem),
        OutputFormat::Json => {
            let output = CscaOutput {
                ski: anchor.ski.as_str(),
                source: anchor.source.to_string(),
                pem: &anchor.pem,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

async fn load_optional(path: Option<&Path>) -> Result<TrustAnchorTable> {
    match path {
        Some(path) => Ok(TrustAnchorTable::load(path).await?),
        None => Ok(TrustAnchorTable::new()),
    }
}
