//! `commsg`: call the message center from the command line.
//!
//! Run:
//!   commsg --config commsg.toml push --from system --to alice --to bob --content "hi"
//!   commsg --project-key abcdefghij0123456789 --server 10.0.0.1:9501 page --read unread
//!
//! The result is printed as JSON on stdout; the exit status is non-zero when
//! the call did not succeed.

mod commands;
mod config;

use clap::Parser;
use commsg_client::Client;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "commsg", version, about = "Message center client")]
struct Cli {
    /// TOML config file
    #[arg(long, env = "COMMSG_CONFIG", default_value = "commsg.toml")]
    config: PathBuf,

    /// 20-character project key
    #[arg(long, env = "COMMSG_PROJECT_KEY")]
    project_key: Option<String>,

    /// Server address, host[:port] or URL (repeatable)
    #[arg(long = "server")]
    servers: Vec<String>,

    #[arg(long, env = "COMMSG_TOKEN")]
    token: Option<String>,

    /// Correlation code forwarded as the request-code header
    #[arg(long, env = "COMMSG_REQUEST_CODE")]
    request_code: Option<String>,

    /// Request timeout in seconds (0 disables)
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("commsg=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let overrides = config::Overrides {
        project_key: cli.project_key,
        servers: cli.servers,
        token: cli.token,
        request_code: cli.request_code,
        timeout_secs: cli.timeout,
    };
    let config = config::load(&cli.config, overrides)?;
    let client = Client::from_config(config)?;

    tracing::debug!(servers = ?client.servers(), "client ready");

    let result = commands::run(&client, cli.command).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::info!(code = result.code(), "call failed: {}", result.message());
        Ok(ExitCode::FAILURE)
    }
}
