use crate::common::{ConsoleArguments, OutputArguments, logout};
use nexpose::model::HostEntry;

/// Start scanning all targets of a site.
#[derive(clap::Args, Debug)]
pub struct Scan {
    #[command(flatten)]
    console: ConsoleArguments,

    /// ID of the site
    site_id: String,

    #[command(flatten)]
    output: OutputArguments,
}

impl Scan {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = self.console.login().await?;
        let result = client.start_site_scan(&self.site_id).await;
        logout(client).await;

        self.output.print(&result?)
    }
}

/// Start scanning selected targets of a site.
#[derive(clap::Args, Debug)]
pub struct ScanHosts {
    #[command(flatten)]
    console: ConsoleArguments,

    /// ID of the site
    pub site_id: String,

    /// Address range to scan, as `from-to` or a single address. May be repeated.
    #[arg(long = "range", value_parser = HostEntry::range, required_unless_present = "hosts")]
    pub ranges: Vec<HostEntry>,

    /// Hostname to scan. May be repeated.
    #[arg(long = "host")]
    pub hosts: Vec<String>,

    #[command(flatten)]
    output: OutputArguments,
}

impl ScanHosts {
    pub fn host_entries(&self) -> Vec<HostEntry> {
        self.ranges
            .iter()
            .cloned()
            .chain(self.hosts.iter().map(HostEntry::host))
            .collect()
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let hosts = self.host_entries();

        let client = self.console.login().await?;
        let result = client.start_scan_on_hosts(&self.site_id, &hosts).await;
        logout(client).await;

        self.output.print(&result?)
    }
}

/// Show the status and statistics of a scan.
#[derive(clap::Args, Debug)]
pub struct ScanSummary {
    #[command(flatten)]
    console: ConsoleArguments,

    /// ID of the scan
    scan_id: String,

    /// ID of the engine running the scan
    engine_id: String,

    #[command(flatten)]
    output: OutputArguments,
}

impl ScanSummary {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = self.console.login().await?;
        let result = client.get_scan_summary(&self.scan_id, &self.engine_id).await;
        logout(client).await;

        self.output.print(&result?)
    }
}
