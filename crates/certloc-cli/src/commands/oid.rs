//! `certloc oid` and `certloc encode-oid`.

use anyhow::{Context, Result};

use certloc_core::{find_oid, ObjectIdentifier};

use super::locate::read_der;
use crate::args::{EncodeOidArgs, OidArgs, OutputFormat};

pub fn run(args: OidArgs) -> Result<()> {
    let message = read_der(&args.der)?;
    let found = find_oid(&args.oid, &message)
        .with_context(|| format!("OID {} not located in {}", args.oid, args.der.display()))?;

    match args.format {
        OutputFormat::Text => println!(
            "oid_index={} oid_length={}",
            found.oid_index, found.oid_length
        ),
        OutputFormat::Json => println!("{}", serde_json::to_string(&found)?),
    }
    Ok(())
}

pub fn run_encode(args: EncodeOidArgs) -> Result<()> {
    let oid: ObjectIdentifier = args.oid.parse()?;
    let bytes = if args.body_only {
        oid.to_der_value()
    } else {
        oid.to_der()?
    };
    println!("{}", hex::encode(bytes));
    Ok(())
}
