//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "stockscan", version, about = "Scan volunteer cards and stock items to borrow and return equipment")]
pub struct Cli {
    /// Config file (default: <config dir>/stockscan/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the inventory service base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Log file (default: <data dir>/stockscan/stockscan.log)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode the QR codes in an image and print each payload
    Decode {
        /// PNG or JPEG file
        image: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "stockscan",
            "--base-url",
            "http://localhost:8000",
            "--config",
            "/tmp/c.toml",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_decode_subcommand() {
        let cli = Cli::parse_from(["stockscan", "decode", "card.png"]);
        match cli.command {
            Some(Command::Decode { image }) => assert_eq!(image, PathBuf::from("card.png")),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
