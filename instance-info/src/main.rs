use anyhow::Result;
use clap::Parser;
use instance_info::{Cli, Commands};
use tracing_log::AsTrace;
use tracing_subscriber::FmtSubscriber;

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  let subscriber = FmtSubscriber::builder()
    .with_max_level(cli.verbose.log_level_filter().as_trace())
    .with_writer(std::io::stderr)
    .without_time()
    .with_ansi(!cli.no_color)
    .finish();
  tracing::subscriber::set_global_default(subscriber).expect("Setting default subscriber failed");

  let client = cli.imds.client()?;

  match &cli.command {
    Commands::Serve(serve) => serve.serve(client).await,
    Commands::Get(get) => get.get(client).await,
  }
}
