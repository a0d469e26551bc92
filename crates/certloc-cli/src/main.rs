use clap::Parser;

mod args;
mod commands;
pub mod exit_codes;

use args::Cli;
use commands::dispatch;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
    let cli = Cli::parse();
    let code = dispatch(cli).await;
    std::process::exit(code);
}
