//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`health`]. Each handler lives in its
//! own submodule.

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::GatewayError;

pub async fn dispatch(cli: Cli) -> Result<(), GatewayError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  storefront v{version} \u{2014} HTTP gateway for Dapr-backed order and pricing services\n\n  \
         No command provided. To get started:\n\n    \
         storefront run                    Start the gateway (sidecar on port 3500)\n    \
         storefront run --dapr-port 3501   Point at a non-default sidecar\n    \
         storefront health                 Check a running instance\n    \
         storefront --help                 See all commands and options\n"
    );
}
