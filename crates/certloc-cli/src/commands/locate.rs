//! `certloc locate` - find a public key in a DER buffer.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use certloc_core::{find_ec_point, find_modulus, locate_public_key, Location, PublicKeyDetails};

use crate::args::{LocateArgs, OutputFormat};

pub fn run(args: LocateArgs) -> Result<()> {
    let message = read_der(&args.der)?;

    let location = if let Some(modulus) = &args.modulus {
        find_modulus(modulus, &message).context("RSA modulus not located")?
    } else if let Some(point) = &args.point {
        find_ec_point(point, &message).context("EC point not located")?
    } else if let Some(key_path) = &args.key {
        let json = fs::read_to_string(key_path)
            .with_context(|| format!("failed to read key file: {}", key_path.display()))?;
        let details: PublicKeyDetails = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse key JSON: {}", key_path.display()))?;
        locate_public_key(&details, &message).context("public key not located")?
    } else {
        anyhow::bail!("must specify --modulus, --point or --key");
    };

    print_location(&location, args.format)
}

pub(crate) fn read_der(path: &Path) -> Result<Vec<u8>> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read DER file: {}", path.display()))?;
    debug!(path = %path.display(), len = bytes.len(), "read DER input");
    Ok(bytes)
}

fn print_location(location: &Location, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!(
            "start_index={} length={}",
            location.start_index, location.length
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string(location)?),
    }
    Ok(())
}
