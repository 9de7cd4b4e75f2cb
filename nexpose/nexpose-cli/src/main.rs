#![forbid(unsafe_code)]

mod cmd;
mod common;

use clap::Parser;
use cmd::{
    login::Login,
    scan::{Scan, ScanHosts, ScanSummary},
    site::{Devices, Hosts, ScanConfig, Sites},
};
use nexpose_common::{cli::log::Logging, utils::measure::MeasureTime};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(version, about = "Nexpose API client", author, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    logging: Logging,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    Login(Login),
    Sites(Sites),
    Hosts(Hosts),
    ScanConfig(ScanConfig),
    Devices(Devices),
    Scan(Scan),
    ScanHosts(ScanHosts),
    ScanSummary(ScanSummary),
}

impl Command {
    pub async fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Login(cmd) => cmd.run().await,
            Self::Sites(cmd) => cmd.run().await,
            Self::Hosts(cmd) => cmd.run().await,
            Self::ScanConfig(cmd) => cmd.run().await,
            Self::Devices(cmd) => cmd.run().await,
            Self::Scan(cmd) => cmd.run().await,
            Self::ScanHosts(cmd) => cmd.run().await,
            Self::ScanSummary(cmd) => cmd.run().await,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        self.logging.init(&["nexpose", "nexpose_cli"]);

        log::debug!("Setup complete, start processing");

        let time = MeasureTime::new();
        self.command.run().await?;
        drop(time);

        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = Cli::parse().run().await {
        log::error!("Failed to execute: {err}");
        for (n, cause) in err.chain().enumerate().skip(1) {
            log::info!("  {n}: {cause}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_scan_hosts() {
        let cli = Cli::try_parse_from([
            "nexpose",
            "scan-hosts",
            "console.local",
            "3780",
            "admin",
            "secret",
            "2",
            "--range",
            "10.0.0.1-10.0.0.5",
            "--host",
            "a.example.com",
            "--tls-insecure",
        ])
        .unwrap();

        let Command::ScanHosts(cmd) = cli.command else {
            panic!("expected the scan-hosts command");
        };

        assert_eq!(cmd.site_id, "2");
        assert_eq!(
            cmd.host_entries()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            ["10.0.0.1-10.0.0.5", "a.example.com"]
        );
    }

    #[test]
    fn reject_empty_range_bound() {
        for range in ["10.0.0.1-", "-10.0.0.5", ""] {
            let result = Cli::try_parse_from([
                "nexpose",
                "scan-hosts",
                "console.local",
                "3780",
                "admin",
                "secret",
                "2",
                "--range",
                range,
            ]);

            assert!(result.is_err(), "range: {range:?}");
        }
    }
}
