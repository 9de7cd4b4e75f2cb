use anyhow::Context;
use nexpose::client::{ApiVersion, NexposeClient};
use nexpose_common::cli::client::ClientArguments;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, clap::Args)]
#[command(next_help_heading = "Console")]
pub struct ConsoleArguments {
    /// Hostname or address of the console
    pub hostname: String,

    /// Port of the console's API
    pub port: u16,

    /// User to log in with
    pub username: String,

    /// Password of the user
    pub password: String,

    /// Version of the XML API
    #[arg(long, default_value = "1.1")]
    pub api_version: ApiVersion,

    #[command(flatten)]
    pub client: ClientArguments,
}

impl ConsoleArguments {
    /// Create a client and log in.
    pub async fn login(self) -> anyhow::Result<NexposeClient> {
        let ConsoleArguments {
            hostname,
            port,
            username,
            password,
            api_version,
            client,
        } = self;

        let mut client = NexposeClient::new(&hostname, port, api_version, client.into())?;
        client
            .login(&username, &password)
            .await
            .with_context(|| format!("Logging in to {hostname}:{port} as '{username}'"))?;

        Ok(client)
    }
}

/// Log out, ignoring a failure to do so.
pub async fn logout(mut client: NexposeClient) {
    if let Err(err) = client.logout().await {
        log::debug!("Ignoring failed logout: {err}");
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    JsonPretty,
}

#[derive(Debug, clap::Args)]
#[command(next_help_heading = "Output")]
pub struct OutputArguments {
    /// Format of the result
    #[arg(short, long, value_enum, default_value = "json")]
    pub output: OutputFormat,
}

impl OutputArguments {
    pub fn print<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();

        match self.output {
            OutputFormat::Json => serde_json::to_writer(&mut out, value)?,
            OutputFormat::JsonPretty => colored_json::write_colored_json(value, &mut out)?,
        }
        writeln!(out)?;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nexpose::model::Site;
    use nexpose_common::sender::Options;
    use url::Url;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string, method},
    };

    async fn respond(server: &MockServer, request: &str, response: &str) {
        Mock::given(method("POST"))
            .and(body_string(request))
            .respond_with(ResponseTemplate::new(200).set_body_string(response))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn print_records() {
        let sites = vec![Site {
            id: "2".into(),
            name: "Lab".into(),
            description: None,
            risk_factor: None,
            risk_score: None,
        }];

        for output in [OutputFormat::Json, OutputFormat::JsonPretty] {
            OutputArguments { output }.print(&sites).unwrap();
        }
    }

    #[tokio::test]
    async fn failed_logout_is_ignored() {
        let server = MockServer::start().await;
        respond(
            &server,
            r#"<LoginRequest user-id="admin" password="admin"/>"#,
            r#"<LoginResponse success="1" session-id="abc123"/>"#,
        )
        .await;
        respond(
            &server,
            r#"<LogoutRequest session-id="abc123"/>"#,
            r#"<Failure><Exception><Message>Session expired</Message></Exception></Failure>"#,
        )
        .await;

        let endpoint = Url::parse(&format!("{}/api/1.1/xml", server.uri())).unwrap();
        let mut client = NexposeClient::with_endpoint(endpoint, Options::new()).unwrap();
        client.login("admin", "admin").await.unwrap();

        logout(client).await;

        server.verify().await;
    }
}
