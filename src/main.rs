use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use stockscan::cli::{Cli, Command};
use stockscan::config::Config;
use stockscan::decoder::{CodeDecoder, ScanInput, WedgeAndImageDecoder};
use stockscan::logging::init_logging;

/// Exit status of `decode` when the image holds no readable code.
const EXIT_NOTHING_FOUND: u8 = 2;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Decode { image }) => {
            let payloads = WedgeAndImageDecoder
                .decode(&ScanInput::Image(image.clone()))
                .with_context(|| format!("cannot decode {}", image.display()))?;
            if payloads.is_empty() {
                eprintln!("No QR code found in {}", image.display());
                return Ok(ExitCode::from(EXIT_NOTHING_FOUND));
            }
            for payload in payloads {
                println!("{payload}");
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let config = load_config(&cli)?;
            if let Some(path) = init_logging(cli.log_file.as_deref()) {
                eprintln!("Logging to {}", path.display());
            }
            stockscan::ui::run(config).context("terminal UI failed")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("cannot load configuration")?;

    match &cli.base_url {
        Some(base_url) => config
            .with_base_url(base_url.as_str())
            .context("invalid --base-url"),
        None => Ok(config),
    }
}
