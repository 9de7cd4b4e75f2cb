use crate::sender::Options;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, clap::Args)]
#[command(next_help_heading = "Client")]
pub struct ClientArguments {
    /// Connect timeout, in humantime duration format.
    #[arg(long, env = "NEXPOSE_CONNECT_TIMEOUT", default_value = "15s")]
    pub connect_timeout: humantime::Duration,

    /// Per-request timeout, in humantime duration format. Unset waits for the server.
    #[arg(long, env = "NEXPOSE_TIMEOUT")]
    pub timeout: Option<humantime::Duration>,

    /// Additional root certificates
    #[arg(long = "tls-ca-certificate", action = clap::ArgAction::Append)]
    pub additional_root_certificates: Vec<PathBuf>,

    /// Accept self-signed certificates and mismatching hostnames (DANGER!)
    #[arg(long)]
    pub tls_insecure: bool,
}

impl From<ClientArguments> for Options {
    fn from(value: ClientArguments) -> Self {
        let ClientArguments {
            connect_timeout,
            timeout,
            additional_root_certificates,
            tls_insecure,
        } = value;

        Options::new()
            .connect_timeout(Duration::from(connect_timeout))
            .timeout(timeout.map(Duration::from))
            .tls_insecure(tls_insecure)
            .additional_root_certificates(additional_root_certificates)
    }
}
