mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, discover};
use sweepr_common::config::Config;
use terminal::logging;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg: Config = commands.to_config();

    match discover::discover(&cfg).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
