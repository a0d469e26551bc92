use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

use certloc_csca::Environment;

#[derive(Parser)]
#[command(
    name = "certloc",
    version,
    about = "Locate public keys and OIDs inside DER certificates, resolve CSCA trust anchors"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Locate an RSA modulus or EC point in a DER buffer
    Locate(LocateArgs),
    /// Locate an OID (tag, length and body) in a DER buffer
    Oid(OidArgs),
    /// Print the DER encoding of a dotted OID
    EncodeOid(EncodeOidArgs),
    /// Resolve a CSCA certificate by subject/authority key identifier
    Csca(CscaArgs),
    /// Fetch the SKI-PEM table from the API
    Fetch(FetchArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum EnvArg {
    Staging,
    #[default]
    Production,
}

impl From<EnvArg> for Environment {
    fn from(env: EnvArg) -> Self {
        match env {
            EnvArg::Staging => Environment::Staging,
            EnvArg::Production => Environment::Production,
        }
    }
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("needle")
        .required(true)
        .args(["modulus", "point", "key"])
))]
pub struct LocateArgs {
    /// File holding the raw DER bytes to search (certificate or tbsCertificate)
    #[arg(long)]
    pub der: PathBuf,

    /// RSA modulus, hex
    #[arg(long)]
    pub modulus: Option<String>,

    /// EC point, hex (usually 04 || X || Y)
    #[arg(long)]
    pub point: Option<String>,

    /// Public key details as emitted by the certificate parser (JSON)
    #[arg(long)]
    pub key: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct OidArgs {
    /// Dotted-decimal OID, e.g. 1.2.840.113549.1.1.11
    pub oid: String,

    /// File holding the raw DER bytes to search
    #[arg(long)]
    pub der: PathBuf,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct EncodeOidArgs {
    /// Dotted-decimal OID
    pub oid: String,

    /// Print only the body, without the 06 tag and length byte
    #[arg(long)]
    pub body_only: bool,
}

#[derive(Args, Debug)]
pub struct CscaArgs {
    /// Key identifier (any case, spaces and colons allowed)
    pub ski: String,

    /// Development SKI-PEM table (JSON)
    #[arg(long, env = "CERTLOC_DEV_TABLE")]
    pub dev_table: Option<PathBuf>,

    /// Production SKI-PEM table (JSON)
    #[arg(long, env = "CERTLOC_PROD_TABLE")]
    pub prod_table: Option<PathBuf>,

    /// Override table; when given, the built-in tables are not consulted
    #[arg(long = "override")]
    pub override_table: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// API environment to query
    #[arg(long = "env", value_enum, default_value_t)]
    pub environment: EnvArg,

    /// Write the table here instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Request timeout in seconds (overrides CERTLOC_TIMEOUT)
    #[arg(long)]
    pub timeout: Option<u64>,
}
