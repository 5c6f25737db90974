use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use forum_client::app::{App, Command};
use forum_client::config::Config;
use forum_client::logging::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "forum", version, about = "Terminal client for the forum")]
struct Cli {
    /// Config file (default: <config dir>/forum-client/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Forum server URL, overrides the config file
    #[arg(long, env = "FORUM_SERVER_URL", global = true)]
    server_url: Option<String>,

    /// Sign in with this email before running the command
    #[arg(long, env = "FORUM_EMAIL", global = true)]
    email: Option<String>,

    #[arg(long, env = "FORUM_PASSWORD", hide_env_values = true, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load config")?
    .with_server_url(cli.server_url.clone())
    .context("Invalid --server-url")?;

    tracing::info!(server = %config.server.base_url, "Starting forum client");
    let mut app = App::new(config).context("Failed to create HTTP client")?;

    if let (Some(email), Some(password)) = (&cli.email, &cli.password) {
        app.sessions()
            .sign_in(email, password)
            .await
            .context("Sign-in failed")?;
    }

    let output = app.run(cli.command.unwrap_or(Command::Shell)).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
