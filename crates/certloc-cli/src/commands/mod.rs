pub mod csca;
pub mod fetch;
pub mod locate;
pub mod oid;

use certloc_core::LocateError;
use certloc_csca::CscaError;

use crate::args::{Cli, Command};
use crate::exit_codes::{INVALID_INPUT, SUCCESS};

pub async fn dispatch(cli: Cli) -> i32 {
    let result = match cli.cmd {
        Command::Locate(args) => locate::run(args),
        Command::Oid(args) => oid::run(args),
        Command::EncodeOid(args) => oid::run_encode(args),
        Command::Csca(args) => csca::run(args).await,
        Command::Fetch(args) => fetch::run(args).await,
    };

    match result {
        Ok(()) => SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(locate_err) = err.downcast_ref::<LocateError>() {
        locate_err.exit_code()
    } else if let Some(csca_err) = err.downcast_ref::<CscaError>() {
        csca_err.exit_code()
    } else {
        INVALID_INPUT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_through_context() {
        let err = Err::<(), _>(LocateError::NotFound {
            needle_len: 4,
            haystack_len: 2,
        })
        .context("locating key")
        .unwrap_err();
        assert_eq!(exit_code_for(&err), 1);

        let err = anyhow::anyhow!("failed to read file");
        assert_eq!(exit_code_for(&err), INVALID_INPUT);

        let err = anyhow::Error::new(CscaError::NotFound {
            ski: "abcd".to_string(),
            override_supplied: false,
        });
        assert_eq!(exit_code_for(&err), 1);
    }
}
