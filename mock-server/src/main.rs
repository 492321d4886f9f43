use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

pub const LISTEN_ADDR_ENV: &str = "MOCK_SERVER_LISTEN_ADDR";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Parser)]
#[command(name = "shortlink-mock-server")]
struct Cli {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    listen_addr: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::try_parse()?;
    let listener = TcpListener::bind(cli.listen_addr).await?;
    info!(listen_addr = %cli.listen_addr, "starting shortlink mock server");
    mock_server::run(listener).await?;
    Ok(())
}
