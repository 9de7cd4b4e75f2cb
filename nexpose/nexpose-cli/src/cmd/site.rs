use crate::common::{ConsoleArguments, OutputArguments, logout};

/// List all sites.
#[derive(clap::Args, Debug)]
pub struct Sites {
    #[command(flatten)]
    console: ConsoleArguments,

    #[command(flatten)]
    output: OutputArguments,
}

impl Sites {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = self.console.login().await?;
        let result = client.list_sites().await;
        logout(client).await;

        self.output.print(&result?)
    }
}

/// List the scan targets of a site.
#[derive(clap::Args, Debug)]
pub struct Hosts {
    #[command(flatten)]
    console: ConsoleArguments,

    /// ID of the site
    site_id: String,

    #[command(flatten)]
    output: OutputArguments,
}

impl Hosts {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = self.console.login().await?;
        let result = client.list_site_hosts(&self.site_id).await;
        logout(client).await;

        self.output.print(&result?)
    }
}

/// Show the scan configuration of a site.
#[derive(clap::Args, Debug)]
pub struct ScanConfig {
    #[command(flatten)]
    console: ConsoleArguments,

    /// ID of the site
    site_id: String,

    #[command(flatten)]
    output: OutputArguments,
}

impl ScanConfig {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = self.console.login().await?;
        let result = client.get_site_scan_config(&self.site_id).await;
        logout(client).await;

        self.output.print(&result?)
    }
}

/// List the assets discovered in a site.
#[derive(clap::Args, Debug)]
pub struct Devices {
    #[command(flatten)]
    console: ConsoleArguments,

    /// ID of the site
    site_id: String,

    #[command(flatten)]
    output: OutputArguments,
}

impl Devices {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = self.console.login().await?;
        let result = client.list_site_devices(&self.site_id).await;
        logout(client).await;

        self.output.print(&result?)
    }
}
