use crate::common::{ConsoleArguments, logout};

/// Log in and print the session ID, then log out again.
#[derive(clap::Args, Debug)]
pub struct Login {
    #[command(flatten)]
    console: ConsoleArguments,
}

impl Login {
    pub async fn run(self) -> anyhow::Result<()> {
        let client = self.console.login().await?;

        if let Some(session_id) = client.session_id() {
            println!("{session_id}");
        }

        logout(client).await;

        Ok(())
    }
}
