use anyhow::Result;
use inc_cli::{Cli, Parser};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.global.env_filter())
        .with_writer(std::io::stderr)
        .init();

    cli.run().await
}
