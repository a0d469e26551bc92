//! CSCA trust anchor resolution.
//!
//! Maps a Subject/Authority Key Identifier to the PEM certificate of the
//! Country Signing CA that issued it:
//!
//! - [`CscaResolver`]: local lookup over an optional override table, then a
//!   development table, then a production table
//! - [`CscaClient`]: one-shot fetch of the full SKI→PEM table from the
//!   staging or production API
//! - [`TrustAnchorTable`]: the read-only table type, loadable from JSON
//!
//! # Quick Start
//!
//! ```no_run
//! use certloc_csca::{CscaClient, CscaResolver, Environment, TrustAnchorTable};
//!
//! # async fn example() -> certloc_csca::CscaResult<()> {
//! let development = TrustAnchorTable::load("ski_pem_dev.json").await?;
//! let production = CscaClient::from_env()?
//!     .fetch_table(Environment::Production)
//!     .await?;
//!
//! let resolver = CscaResolver::new(development, production);
//! let pem = resolver.resolve("AB:CD:EF:01", None)?;
//! println!("{pem}");
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `CERTLOC_API_URL` | Production base URL (default: `https://api.self.xyz`) |
//! | `CERTLOC_API_URL_STAGING` | Staging base URL (default: `https://api.staging.self.xyz`) |
//! | `CERTLOC_TIMEOUT` | Request timeout in seconds (default: 30) |

pub mod client;
pub mod error;
pub mod resolver;
pub mod table;
pub mod types;

pub use client::{fetch_trust_anchor_table, CscaClient, CSCA_USER_AGENT, SKI_PEM_PATH};
pub use error::{CscaError, CscaResult, FetchError};
pub use resolver::{ensure_pem, AnchorSource, CscaResolver, ResolvedAnchor};
pub use table::{KeyIdentifier, TrustAnchorTable};
pub use types::{CscaConfig, Environment};
